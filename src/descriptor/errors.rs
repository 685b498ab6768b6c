//! Descriptor error types
//!
//! Error codes:
//! - RUNTYPE_INVALID_DESCRIPTOR (construction or argument misuse)
//! - RUNTYPE_ALREADY_PARAMETERIZED (unsupported operation)
//! - RUNTYPE_VALIDATION_FAILED (value does not conform)

use thiserror::Error;

/// Result type for descriptor operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The single failure taxonomy shared by every descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Descriptor built with neither caster nor checker, or fed an argument
    /// it cannot interpret.
    #[error("Descriptor '{name}' is invalid: {reason}")]
    InvalidDescriptor { name: String, reason: String },

    /// Parameterizing a descriptor that already carries arguments
    #[error("Cannot parameterize already parameterized descriptor {descriptor}")]
    AlreadyParameterized { descriptor: String },

    /// Value failed a cast or check
    #[error("{}", render_failure(.path, .reason))]
    Failed {
        /// Location of the failing element (e.g. "user.tags[1]"), empty at the root
        path: String,
        /// Human-readable reason
        reason: String,
    },
}

impl ValidationError {
    /// Create a validation failure at the root of the value
    pub fn failed(reason: impl Into<String>) -> Self {
        ValidationError::Failed {
            path: String::new(),
            reason: reason.into(),
        }
    }

    /// Create an invalid descriptor error
    pub fn invalid_descriptor(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidDescriptor {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidDescriptor { .. } => "RUNTYPE_INVALID_DESCRIPTOR",
            ValidationError::AlreadyParameterized { .. } => "RUNTYPE_ALREADY_PARAMETERIZED",
            ValidationError::Failed { .. } => "RUNTYPE_VALIDATION_FAILED",
        }
    }

    /// Returns the human-readable reason without location
    pub fn reason(&self) -> String {
        match self {
            ValidationError::Failed { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Returns the location of a validation failure, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            ValidationError::Failed { path, .. } if !path.is_empty() => Some(path),
            _ => None,
        }
    }

    /// Returns whether this error is a plain validation failure
    pub fn is_failure(&self) -> bool {
        matches!(self, ValidationError::Failed { .. })
    }

    /// Prefix the failure location with a mapping key.
    ///
    /// Only validation failures carry a location; other kinds pass through.
    pub fn at_key(self, key: &str) -> Self {
        self.prefixed(key.to_string())
    }

    /// Prefix the failure location with a sequence index.
    pub fn at_index(self, index: usize) -> Self {
        self.prefixed(format!("[{}]", index))
    }

    fn prefixed(self, segment: String) -> Self {
        match self {
            ValidationError::Failed { path, reason } => {
                let path = if path.is_empty() {
                    segment
                } else if path.starts_with('[') {
                    format!("{}{}", segment, path)
                } else {
                    format!("{}.{}", segment, path)
                };
                ValidationError::Failed { path, reason }
            }
            other => other,
        }
    }
}

fn render_failure(path: &str, reason: &str) -> String {
    if path.is_empty() {
        reason.to_string()
    } else {
        format!("'{}': {}", path, reason)
    }
}
