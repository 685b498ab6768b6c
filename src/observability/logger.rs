//! Structured JSON logger
//!
//! One record per line on stderr: `event` first, then `severity`, then the
//! fields sorted by key. Records below the process-wide threshold are
//! dropped before they are rendered.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-call detail
    Trace = 0,
    Info = 1,
    /// API misuse the caller can recover from
    Warn = 2,
    Error = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    fn from_u8(level: u8) -> Self {
        match level {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static THRESHOLD: AtomicU8 = AtomicU8::new(Severity::Warn as u8);

/// A single structured log line.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    pub event: &'a str,
    pub severity: Severity,
    pub fields: Vec<(&'a str, &'a str)>,
}

impl<'a> Record<'a> {
    pub fn new(event: &'a str, severity: Severity, fields: &[(&'a str, &'a str)]) -> Self {
        let mut fields = fields.to_vec();
        fields.sort_by_key(|(key, _)| *key);
        Self {
            event,
            severity,
            fields,
        }
    }

    /// Renders the record as one JSON line, trailing newline included
    pub fn render(&self) -> String {
        let mut line = String::with_capacity(128);
        line.push_str("{\"event\":");
        push_json_string(&mut line, self.event);
        line.push_str(",\"severity\":");
        push_json_string(&mut line, self.severity.as_str());
        for (key, value) in &self.fields {
            line.push(',');
            push_json_string(&mut line, key);
            line.push(':');
            push_json_string(&mut line, value);
        }
        line.push_str("}\n");
        line
    }
}

fn push_json_string(line: &mut String, s: &str) {
    line.push('"');
    for c in s.chars() {
        match c {
            '"' => line.push_str("\\\""),
            '\\' => line.push_str("\\\\"),
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            '\t' => line.push_str("\\t"),
            c if c.is_control() => line.push_str(&format!("\\u{:04x}", c as u32)),
            c => line.push(c),
        }
    }
    line.push('"');
}

/// Process-wide structured logger
pub struct Logger;

impl Logger {
    /// Sets the lowest severity that is emitted (default `Warn`)
    pub fn set_threshold(severity: Severity) {
        THRESHOLD.store(severity as u8, Ordering::Relaxed);
    }

    pub fn threshold() -> Severity {
        Severity::from_u8(THRESHOLD.load(Ordering::Relaxed))
    }

    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::threshold()
    }

    /// Log a typed event at its own severity
    pub fn event(event: Event, fields: &[(&str, &str)]) {
        Self::log(event.severity(), event.as_str(), fields);
    }

    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        let record = Record::new(event, severity, fields);
        Self::write_record(&record, &mut io::stderr());
    }

    fn write_record<W: Write>(record: &Record<'_>, writer: &mut W) {
        // Sink errors are ignored
        let _ = writer.write_all(record.render().as_bytes());
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(event: Event, fields: &[(&str, &str)]) -> serde_json::Value {
        let record = Record::new(event.as_str(), event.severity(), fields);
        let mut buffer = Vec::new();
        Logger::write_record(&record, &mut buffer);
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert_eq!(Severity::from_u8(Severity::Warn as u8), Severity::Warn);
    }

    #[test]
    fn test_default_threshold_drops_trace() {
        assert_eq!(Logger::threshold(), Severity::Warn);
        assert!(!Logger::enabled(Event::ArgumentRejected.severity()));
        assert!(Logger::enabled(Event::DescriptorRejected.severity()));
    }

    #[test]
    fn test_record_is_json() {
        let parsed = render(Event::ArgumentRejected, &[("argument", "b")]);
        assert_eq!(parsed["event"], "ARGUMENT_REJECTED");
        assert_eq!(parsed["severity"], "TRACE");
        assert_eq!(parsed["argument"], "b");
    }

    #[test]
    fn test_fields_sorted_after_event() {
        let a = Record::new("E", Severity::Warn, &[("zebra", "1"), ("apple", "2")]).render();
        let b = Record::new("E", Severity::Warn, &[("apple", "2"), ("zebra", "1")]).render();
        assert_eq!(a, b);
        assert_eq!(a, "{\"event\":\"E\",\"severity\":\"WARN\",\"apple\":\"2\",\"zebra\":\"1\"}\n");
    }

    #[test]
    fn test_escapes_reason_text() {
        let parsed = render(
            Event::DescriptorReparameterized,
            &[("descriptor", "Charset[\"01\"]\n")],
        );
        assert_eq!(parsed["descriptor"], "Charset[\"01\"]\n");
    }
}
