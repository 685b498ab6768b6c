//! Pattern configuration
//!
//! Flags applied when compiling the regex bound to a `Pattern` descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Regex compilation flags for pattern descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFlags {
    /// Letters match regardless of case
    #[serde(default)]
    pub case_insensitive: bool,
    /// `^`/`$` match at line boundaries
    #[serde(default)]
    pub multi_line: bool,
    /// `.` also matches `\n`
    #[serde(default = "default_dot_matches_new_line")]
    pub dot_matches_new_line: bool,
    /// Whitespace and `#` comments in the pattern are ignored
    #[serde(default)]
    pub ignore_whitespace: bool,
}

fn default_dot_matches_new_line() -> bool {
    true
}

impl Default for PatternFlags {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: true,
            ignore_whitespace: false,
        }
    }
}

impl PatternFlags {
    /// Default flags plus case-insensitive matching.
    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
            ..Self::default()
        }
    }

    /// Inline flag letters, as accepted by `(?flags)`
    pub fn letters(&self) -> String {
        let mut letters = String::new();
        if self.case_insensitive {
            letters.push('i');
        }
        if self.multi_line {
            letters.push('m');
        }
        if self.dot_matches_new_line {
            letters.push('s');
        }
        if self.ignore_whitespace {
            letters.push('x');
        }
        letters
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flags({})", self.letters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dot_all() {
        let flags = PatternFlags::default();
        assert!(flags.dot_matches_new_line);
        assert!(!flags.case_insensitive);
        assert_eq!(flags.letters(), "s");
    }

    #[test]
    fn test_case_insensitive() {
        let flags = PatternFlags::case_insensitive();
        assert_eq!(flags.letters(), "is");
        assert_eq!(flags.to_string(), "flags(is)");
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let flags: PatternFlags = serde_json::from_str(r#"{"multi_line": true}"#).unwrap();
        assert!(flags.multi_line);
        assert!(flags.dot_matches_new_line);
        assert!(!flags.ignore_whitespace);
    }
}
