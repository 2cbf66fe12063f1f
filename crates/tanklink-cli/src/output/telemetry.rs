//! Telemetry sinks for the interactive session.

use std::io::{self, Write};

use chrono::{DateTime, Local, SecondsFormat};
use colored::*;
use serde_json::json;

use tanklink_core::protocol::LineAssembler;
use tanklink_core::session::{RawSink, TelemetrySink};
use tanklink_core::types::DeviceAddress;

use crate::cli::OutputFormat;

/// Build the sink for `format`, writing to stdout.
pub fn make_sink(format: OutputFormat, address: &DeviceAddress) -> Box<dyn TelemetrySink> {
    match format {
        OutputFormat::Raw => Box::new(RawSink::new(io::stdout())),
        OutputFormat::Lines => Box::new(LineSink::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonLineSink::new(io::stdout(), address.clone())),
    }
}

/// Prints each complete line prefixed with the local receive time.
pub struct LineSink<W: Write> {
    out: W,
    assembler: LineAssembler,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            assembler: LineAssembler::new(),
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", format_line(Local::now(), line))
    }
}

impl<W: Write> TelemetrySink for LineSink<W> {
    fn write_chunk(&mut self, chunk: &str) -> io::Result<()> {
        for line in self.assembler.push(chunk) {
            self.write_line(&line)?;
        }
        self.out.flush()
    }

    fn write_notice(&mut self, notice: &str) -> io::Result<()> {
        eprintln!("{}", notice.red());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if let Some(rest) = self.assembler.take_partial() {
            self.write_line(&rest)?;
        }
        self.out.flush()
    }
}

/// Emits one JSON object per complete line (NDJSON).
pub struct JsonLineSink<W: Write> {
    out: W,
    device: DeviceAddress,
    assembler: LineAssembler,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(out: W, device: DeviceAddress) -> Self {
        Self {
            out,
            device,
            assembler: LineAssembler::new(),
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let record = json!({
            "device": self.device,
            "timestamp": Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
            "line": line,
        });
        writeln!(self.out, "{}", record)
    }
}

impl<W: Write> TelemetrySink for JsonLineSink<W> {
    fn write_chunk(&mut self, chunk: &str) -> io::Result<()> {
        for line in self.assembler.push(chunk) {
            self.write_line(&line)?;
        }
        self.out.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        if let Some(rest) = self.assembler.take_partial() {
            self.write_line(&rest)?;
        }
        self.out.flush()
    }
}

fn format_line(received_at: DateTime<Local>, line: &str) -> String {
    let stamp = received_at.format("%H:%M:%S%.3f").to_string();
    format!("{} {}", stamp.dimmed(), line)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_format_line_has_timestamp() {
        colored::control::set_override(false);
        let at = Local.with_ymd_and_hms(2026, 1, 2, 13, 4, 5).unwrap();
        assert_eq!(format_line(at, "Battery 7.4V"), "13:04:05.000 Battery 7.4V");
    }

    #[test]
    fn test_line_sink_waits_for_newline() {
        let mut sink = LineSink::new(Vec::new());
        sink.write_chunk("Motor 0").unwrap();
        assert!(sink.out.is_empty());

        sink.write_chunk(": FWD\r\nMot").unwrap();
        sink.finish().unwrap();

        let out = String::from_utf8(sink.out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Motor 0: FWD"));
        assert!(lines[1].ends_with("Mot"));
    }

    #[test]
    fn test_json_line_sink_emits_ndjson() {
        let mut sink = JsonLineSink::new(Vec::new(), DeviceAddress::new("24:A1:62:00:11:22"));
        sink.write_chunk("Tank ready\nBattery 7.4V\n").unwrap();
        sink.finish().unwrap();

        let out = String::from_utf8(sink.out).unwrap();
        let records: Vec<Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["device"], "24:A1:62:00:11:22");
        assert_eq!(records[0]["line"], "Tank ready");
        assert_eq!(records[1]["line"], "Battery 7.4V");
        assert!(records[1]["timestamp"].is_string());
    }
}
