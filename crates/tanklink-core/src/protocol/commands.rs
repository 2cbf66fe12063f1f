//! Command string builders for the tank controller vocabulary.
//!
//! The link never interprets commands; these builders exist so the usage
//! banner and any scripted callers spell them the way the firmware expects.

/// Maximum absolute track speed accepted by `tms`.
pub const MAX_TRACK_SPEED: i32 = 200;

/// Tank drive directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    Forward,
    Backward,
    Left,
    Right,
    TurnLeft,
    TurnRight,
}

impl Drive {
    fn code(self) -> &'static str {
        match self {
            Drive::Forward => "tf",
            Drive::Backward => "tb",
            Drive::Left => "tl",
            Drive::Right => "tr",
            Drive::TurnLeft => "ttl",
            Drive::TurnRight => "ttr",
        }
    }
}

/// Arm/claw motor actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorAction {
    Forward,
    Backward,
    Stop,
    /// Claw grab-and-hold (motor 0 only on current firmware)
    Hold,
}

impl MotorAction {
    fn code(self) -> char {
        match self {
            MotorAction::Forward => 'f',
            MotorAction::Backward => 'b',
            MotorAction::Stop => 's',
            MotorAction::Hold => 'x',
        }
    }
}

/// Motor ids on the arm.
pub mod motors {
    pub const CLAW_GRAB: u8 = 0;
    pub const CLAW_ROTATE: u8 = 1;
    pub const MIDDLE_REACH: u8 = 2;
    pub const BASE_REACH: u8 = 3;
}

/// Command builders for the controller protocol
pub struct Commands;

impl Commands {
    // ==================== Tank commands ====================

    pub fn tank_stop() -> &'static str {
        "ts"
    }

    /// Drive in a direction, optionally with an explicit speed.
    pub fn tank_drive(direction: Drive, speed: Option<u8>) -> String {
        match speed {
            Some(spd) => format!("{}{}", direction.code(), spd),
            None => direction.code().to_string(),
        }
    }

    /// Set both track speeds; values are clamped to ±[`MAX_TRACK_SPEED`].
    pub fn tank_set_motors(left: i32, right: i32) -> String {
        format!("tms{}{}", clamp_speed(left), clamp_speed(right))
    }

    // ==================== Arm commands ====================

    pub fn motor(motor_id: u8, action: MotorAction) -> String {
        format!("m{}{}", motor_id, action.code())
    }

    pub fn claw_grab(forward: bool) -> String {
        Self::motor(motors::CLAW_GRAB, direction(forward))
    }

    pub fn claw_rotate(forward: bool) -> String {
        Self::motor(motors::CLAW_ROTATE, direction(forward))
    }

    pub fn middle_reach(forward: bool) -> String {
        Self::motor(motors::MIDDLE_REACH, direction(forward))
    }

    pub fn base_reach(forward: bool) -> String {
        Self::motor(motors::BASE_REACH, direction(forward))
    }

    // ==================== System commands ====================

    pub fn stop_all() -> &'static str {
        "stopall"
    }

    pub fn status() -> &'static str {
        "status"
    }

    pub fn demo() -> &'static str {
        "d"
    }

    pub fn help() -> &'static str {
        "h"
    }
}

fn direction(forward: bool) -> MotorAction {
    if forward {
        MotorAction::Forward
    } else {
        MotorAction::Backward
    }
}

fn clamp_speed(speed: i32) -> i32 {
    speed.clamp(-MAX_TRACK_SPEED, MAX_TRACK_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tank_drive() {
        assert_eq!(Commands::tank_drive(Drive::Forward, Some(50)), "tf50");
        assert_eq!(Commands::tank_drive(Drive::TurnRight, None), "ttr");
        assert_eq!(Commands::tank_stop(), "ts");
    }

    #[test]
    fn test_tank_set_motors() {
        assert_eq!(Commands::tank_set_motors(150, -100), "tms150-100");
    }

    #[test]
    fn test_tank_set_motors_clamps() {
        assert_eq!(Commands::tank_set_motors(500, -999), "tms200-200");
    }

    #[test]
    fn test_motor_commands() {
        assert_eq!(Commands::claw_grab(true), "m0f");
        assert_eq!(Commands::claw_rotate(false), "m1b");
        assert_eq!(Commands::middle_reach(true), "m2f");
        assert_eq!(Commands::base_reach(false), "m3b");
        assert_eq!(Commands::motor(0, MotorAction::Hold), "m0x");
        assert_eq!(Commands::motor(2, MotorAction::Stop), "m2s");
    }
}
