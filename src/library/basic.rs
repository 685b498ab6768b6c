//! Primitive descriptors and the generic combinators
//!
//! - Any: everything
//! - Optional: none, or an instance of the inner type
//! - Union: an instance of at least one member
//! - Literal: equal to one of the listed values
//! - Text / AnyStr, ByteString, Integer, Float, Boolean: exact runtime kind

use std::sync::LazyLock;

use crate::descriptor::{
    ensure_instance, Argument, Descriptor, IsInstance, ValidationError, ValidationResult, Value,
};

use super::arguments::{type_argument, type_arguments, type_mismatch, value_arguments};

pub static ANY: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("Any", |value, _| Ok(value.clone()), |_, _| Ok(())));

pub static OPTIONAL: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("Optional", optional_cast, optional_check));

pub static UNION: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("Union", union_cast, union_check));

pub static LITERAL: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("Literal", literal_cast, literal_check));

pub static TEXT: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("Text", text_cast, text_check));

pub static ANY_STR: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("AnyStr", text_cast, text_check));

pub static BYTE_STRING: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("ByteString", bytes_cast, bytes_check));

pub static INTEGER: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_checker("Integer", |value, _| match value {
        Value::Int(_) => Ok(()),
        other => Err(type_mismatch("integer", other)),
    })
});

pub static FLOAT: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_checker("Float", |value, _| match value {
        Value::Float(_) => Ok(()),
        other => Err(type_mismatch("float", other)),
    })
});

pub static BOOLEAN: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_checker("Boolean", |value, _| match value {
        Value::Bool(_) => Ok(()),
        other => Err(type_mismatch("boolean", other)),
    })
});

/// `Optional[inner]`
pub fn optional(inner: impl Into<Argument>) -> Descriptor {
    OPTIONAL.bind(vec![inner.into()])
}

/// `Union[members...]`
pub fn union<I>(members: I) -> Descriptor
where
    I: IntoIterator,
    I::Item: Into<Argument>,
{
    UNION.bind(members.into_iter().map(Into::into).collect())
}

/// `Literal[values...]`
pub fn literal<I>(values: I) -> Descriptor
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    LITERAL.bind(
        values
            .into_iter()
            .map(|value| Argument::Value(value.into()))
            .collect(),
    )
}

fn optional_cast(value: &Value, arguments: &[Argument]) -> ValidationResult<Value> {
    let inner = type_argument("Optional", arguments, 0)?;
    if value.is_none() {
        return Ok(Value::None);
    }
    inner.cast(value)
}

fn optional_check(value: &Value, arguments: &[Argument]) -> ValidationResult<()> {
    let inner = type_argument("Optional", arguments, 0)?;
    if value.is_none() {
        return Ok(());
    }
    ensure_instance(value, inner)
}

fn union_members(arguments: &[Argument]) -> ValidationResult<Vec<&Descriptor>> {
    type_arguments("Union", arguments)
}

fn no_member_matched(members: &[&Descriptor]) -> ValidationError {
    let names: Vec<String> = members.iter().map(|d| d.to_string()).collect();
    ValidationError::failed(format!(
        "Value is not an instance of one of the following types: [{}]",
        names.join(", ")
    ))
}

// The first member that accepts the value wins; the value is returned as is.
fn union_cast(value: &Value, arguments: &[Argument]) -> ValidationResult<Value> {
    union_check(value, arguments)?;
    Ok(value.clone())
}

fn union_check(value: &Value, arguments: &[Argument]) -> ValidationResult<()> {
    let members = union_members(arguments)?;
    if members.iter().any(|member| value.is_instance(member)) {
        return Ok(());
    }
    Err(no_member_matched(&members))
}

fn literal_check(value: &Value, arguments: &[Argument]) -> ValidationResult<()> {
    let allowed = value_arguments("Literal", arguments)?;
    if allowed.iter().any(|candidate| *candidate == value) {
        return Ok(());
    }
    let names: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
    Err(ValidationError::failed(format!(
        "Value {} is not one of [{}]",
        value,
        names.join(", ")
    )))
}

fn literal_cast(value: &Value, arguments: &[Argument]) -> ValidationResult<Value> {
    literal_check(value, arguments)?;
    Ok(value.clone())
}

fn text_cast(value: &Value, _: &[Argument]) -> ValidationResult<Value> {
    Ok(Value::Text(value.to_text()))
}

fn text_check(value: &Value, _: &[Argument]) -> ValidationResult<()> {
    match value {
        Value::Text(_) => Ok(()),
        other => Err(type_mismatch("text", other)),
    }
}

fn bytes_cast(value: &Value, _: &[Argument]) -> ValidationResult<Value> {
    value.to_bytes().map(Value::Bytes)
}

fn bytes_check(value: &Value, _: &[Argument]) -> ValidationResult<()> {
    match value {
        Value::Bytes(_) => Ok(()),
        other => Err(type_mismatch("byte string", other)),
    }
}
