//! Membership bridge
//!
//! Lets a value be tested against any descriptor the way it would be tested
//! against a type, so combinators can test nested element types without
//! knowing whether they are primitives or other combinators.

use super::descriptor::Descriptor;
use super::errors::{ValidationError, ValidationResult};
use super::value::Value;

/// "Is this value an instance of the descriptor?"
pub trait IsInstance {
    /// Never fails: validation errors are reported as `false`.
    fn is_instance(&self, descriptor: &Descriptor) -> bool;
}

impl IsInstance for Value {
    fn is_instance(&self, descriptor: &Descriptor) -> bool {
        descriptor.check(self)
    }
}

/// Requires `value` to be an instance of `descriptor`.
///
/// A failure of the value itself is reworded to name the descriptor. Nested
/// failures already carry a location and were named where they happened.
/// Other error kinds propagate unchanged.
pub fn ensure_instance(value: &Value, descriptor: &Descriptor) -> ValidationResult<()> {
    descriptor.validate(value).map_err(|err| match err {
        ValidationError::Failed { path, reason } if path.is_empty() => ValidationError::Failed {
            path,
            reason: format!("Value is not an instance of {}: {}", descriptor, reason),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::predicate;

    #[test]
    fn test_is_instance_delegates_to_check() {
        let positive = predicate("Positive", |v, _| matches!(v, Value::Int(i) if *i > 0));
        assert!(Value::Int(1).is_instance(&positive));
        assert!(!Value::Int(-1).is_instance(&positive));
        assert!(!Value::from("1").is_instance(&positive));
    }

    #[test]
    fn test_ensure_instance_names_descriptor() {
        let positive = predicate("Positive", |v, _| matches!(v, Value::Int(i) if *i > 0));
        let err = ensure_instance(&Value::Int(0), &positive).unwrap_err();
        assert!(err.reason().contains("not an instance of Positive"));
    }
}
