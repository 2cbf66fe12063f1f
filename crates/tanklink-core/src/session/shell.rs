//! Operator-facing shell: usage banner and input classification.

use crate::protocol::commands::{Commands, Drive, MotorAction};

/// Keywords that end the session (matched case-insensitively).
pub const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "q"];

/// One operator input line, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellInput<'a> {
    Exit,
    Empty,
    Command(&'a str),
}

impl<'a> ShellInput<'a> {
    /// Trim trailing whitespace and classify.
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            ShellInput::Empty
        } else if is_exit_keyword(trimmed) {
            ShellInput::Exit
        } else {
            ShellInput::Command(trimmed)
        }
    }
}

pub fn is_exit_keyword(input: &str) -> bool {
    EXIT_KEYWORDS.iter().any(|k| input.eq_ignore_ascii_case(k))
}

/// Usage text printed before the session starts.
pub fn usage() -> String {
    let rule = "=".repeat(50);
    let lines = vec![
        String::new(),
        rule.clone(),
        "TANK ROBOT BLUETOOTH CONTROLLER".to_string(),
        rule.clone(),
        "Commands:".to_string(),
        format!(
            "  Tank: {}[spd], {}[spd], {}[spd], {}[spd], {}[spd], {}[spd]",
            Commands::tank_drive(Drive::Forward, None),
            Commands::tank_drive(Drive::Backward, None),
            Commands::tank_drive(Drive::Left, None),
            Commands::tank_drive(Drive::Right, None),
            Commands::tank_drive(Drive::TurnLeft, None),
            Commands::tank_drive(Drive::TurnRight, None),
        ),
        format!(
            "        {}, tms<L><R> (e.g., {})",
            Commands::tank_stop(),
            Commands::tank_set_motors(150, -100)
        ),
        format!(
            "  Claw/Reach: {},{},{},{} (claw grab)",
            Commands::claw_grab(true),
            Commands::claw_grab(false),
            Commands::motor(0, MotorAction::Stop),
            Commands::motor(0, MotorAction::Hold),
        ),
        format!(
            "             {},{} (claw rotate)",
            Commands::claw_rotate(true),
            Commands::claw_rotate(false)
        ),
        format!(
            "             {},{} (middle reach)",
            Commands::middle_reach(true),
            Commands::middle_reach(false)
        ),
        format!(
            "             {},{} (base reach)",
            Commands::base_reach(true),
            Commands::base_reach(false)
        ),
        format!(
            "  System: {} (demo), {}, {}, {} (help)",
            Commands::demo(),
            Commands::status(),
            Commands::stop_all(),
            Commands::help()
        ),
        format!("  {} or Ctrl+C to exit", EXIT_KEYWORDS.join("/")),
        rule,
        String::new(),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_keywords_any_case() {
        for input in ["exit", "QUIT", "q", "Q", "Exit", "quit  \n"] {
            assert_eq!(ShellInput::parse(input), ShellInput::Exit, "{input:?}");
        }
    }

    #[test]
    fn test_exit_keyword_must_match_whole_line() {
        assert_eq!(ShellInput::parse("quitx"), ShellInput::Command("quitx"));
        assert_eq!(ShellInput::parse("q1"), ShellInput::Command("q1"));
    }

    #[test]
    fn test_parse_trims_trailing_whitespace_only() {
        assert_eq!(ShellInput::parse("tf50\r\n"), ShellInput::Command("tf50"));
        assert_eq!(ShellInput::parse("  ts"), ShellInput::Command("  ts"));
        assert_eq!(ShellInput::parse("   \n"), ShellInput::Empty);
    }

    #[test]
    fn test_usage_lists_vocabulary() {
        let text = usage();
        assert!(text.contains("tf[spd]"));
        assert!(text.contains("tms150-100"));
        assert!(text.contains("m0f,m0b,m0s,m0x"));
        assert!(text.contains("exit/quit/q"));
    }
}
