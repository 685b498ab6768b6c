//! Observable descriptor events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Events emitted by the descriptor engine and the argument layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Descriptor construction refused (no caster and no checker)
    DescriptorRejected,
    /// Parameterization attempted on a parameterized descriptor
    DescriptorReparameterized,
    /// A call argument failed its declared descriptor
    ArgumentRejected,
}

impl Event {
    /// Returns the event name as logged
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::DescriptorRejected => "DESCRIPTOR_REJECTED",
            Event::DescriptorReparameterized => "DESCRIPTOR_REPARAMETERIZED",
            Event::ArgumentRejected => "ARGUMENT_REJECTED",
        }
    }

    /// Returns the severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DescriptorRejected | Event::DescriptorReparameterized => Severity::Warn,
            Event::ArgumentRejected => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::DescriptorRejected.as_str(), "DESCRIPTOR_REJECTED");
        assert_eq!(Event::DescriptorReparameterized.as_str(), "DESCRIPTOR_REPARAMETERIZED");
        assert_eq!(Event::ArgumentRejected.to_string(), "ARGUMENT_REJECTED");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::DescriptorRejected.severity(), Severity::Warn);
        assert_eq!(Event::ArgumentRejected.severity(), Severity::Trace);
    }
}
