//! Argument and value accessors shared by the built-in descriptors.

use crate::descriptor::{Argument, Descriptor, Map, ValidationError, ValidationResult, Value};

use super::basic::ANY;

/// Returns the descriptor bound at `index`, or `Any` when absent.
pub(crate) fn type_argument<'a>(
    owner: &str,
    arguments: &'a [Argument],
    index: usize,
) -> ValidationResult<&'a Descriptor> {
    match arguments.get(index) {
        None => Ok(&*ANY),
        Some(Argument::Type(descriptor)) => Ok(descriptor),
        Some(other) => Err(ValidationError::invalid_descriptor(
            owner,
            format!("argument {} must be a descriptor, got {}", index, other),
        )),
    }
}

/// Returns every bound argument as a descriptor.
pub(crate) fn type_arguments<'a>(
    owner: &str,
    arguments: &'a [Argument],
) -> ValidationResult<Vec<&'a Descriptor>> {
    (0..arguments.len())
        .map(|index| type_argument(owner, arguments, index))
        .collect()
}

/// Returns every bound argument as a plain value.
pub(crate) fn value_arguments<'a>(
    owner: &str,
    arguments: &'a [Argument],
) -> ValidationResult<Vec<&'a Value>> {
    arguments
        .iter()
        .enumerate()
        .map(|(index, argument)| {
            argument.as_value().ok_or_else(|| {
                ValidationError::invalid_descriptor(
                    owner,
                    format!("argument {} must be a value, got {}", index, argument),
                )
            })
        })
        .collect()
}

/// Returns the text bound at `index`.
pub(crate) fn text_argument<'a>(
    owner: &str,
    arguments: &'a [Argument],
    index: usize,
) -> ValidationResult<&'a str> {
    match arguments.get(index) {
        Some(Argument::Value(Value::Text(text))) => Ok(text),
        Some(other) => Err(ValidationError::invalid_descriptor(
            owner,
            format!("argument {} must be text, got {}", index, other),
        )),
        None => Err(ValidationError::invalid_descriptor(
            owner,
            format!("argument {} is required", index),
        )),
    }
}

/// Requires the value to be text.
pub(crate) fn expect_text(value: &Value) -> ValidationResult<&str> {
    value.as_str().ok_or_else(|| type_mismatch("text", value))
}

/// Requires the value to be a mapping.
pub(crate) fn expect_map(value: &Value) -> ValidationResult<&Map> {
    value.as_map().ok_or_else(|| type_mismatch("mapping", value))
}

/// Requires the value to be a list or a tuple.
pub(crate) fn expect_sequence(value: &Value) -> ValidationResult<&[Value]> {
    value
        .as_sequence()
        .ok_or_else(|| type_mismatch("sequence", value))
}

/// Creates a type mismatch failure.
pub(crate) fn type_mismatch(expected: &str, actual: &Value) -> ValidationError {
    ValidationError::failed(format!(
        "Value is not {} {} (got {})",
        article(expected),
        expected,
        actual.type_name()
    ))
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}
