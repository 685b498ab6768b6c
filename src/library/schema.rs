//! Schema combinator for nested records
//!
//! Validation semantics:
//! - The value must be a mapping
//! - Undeclared keys are rejected
//! - A missing key is validated as `None` against its declared type, so
//!   only `Optional[...]` (or `Any`) fields may be absent
//! - Nested field sets are validated recursively
//! - Casting requires every declared value to already be an instance of its
//!   type; it emits exactly the declared keys, in declaration order

use std::fmt;
use std::sync::LazyLock;

use crate::descriptor::{ensure_instance, Argument, Descriptor, Map, ValidationError, ValidationResult, Value};

use super::arguments::expect_map;

static NONE: Value = Value::None;

pub static SCHEMA: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("Schema", schema_cast, schema_check));

/// `Schema[fields]`
pub fn schema(fields: Fields) -> Descriptor {
    SCHEMA.bind(vec![Argument::Fields(fields)])
}

/// A declared schema field: a descriptor or a nested field set.
#[derive(Clone, Debug)]
pub enum Field {
    Type(Descriptor),
    Nested(Fields),
}

impl From<Descriptor> for Field {
    fn from(d: Descriptor) -> Self {
        Field::Type(d)
    }
}

impl From<&Descriptor> for Field {
    fn from(d: &Descriptor) -> Self {
        Field::Type(d.clone())
    }
}

impl From<&LazyLock<Descriptor>> for Field {
    fn from(d: &LazyLock<Descriptor>) -> Self {
        Field::Type(Descriptor::clone(d))
    }
}

impl From<Fields> for Field {
    fn from(fields: Fields) -> Self {
        Field::Nested(fields)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Type(d) => write!(f, "{}", d),
            Field::Nested(fields) => write!(f, "{}", fields),
        }
    }
}

/// Declared fields of a schema, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Fields {
    entries: Vec<(String, Field)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Redeclaring a name replaces its type in place.
    pub fn field(mut self, name: impl Into<String>, field: impl Into<Field>) -> Self {
        let name = name.into();
        let field = field.into();
        match self.entries.iter_mut().find(|(declared, _)| *declared == name) {
            Some((_, slot)) => *slot = field,
            None => self.entries.push((name, field)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.entries
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, field)| field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, field)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", name, field)?;
        }
        write!(f, "}}")
    }
}

fn schema_fields(arguments: &[Argument]) -> ValidationResult<&Fields> {
    match arguments.first() {
        Some(Argument::Fields(fields)) => Ok(fields),
        Some(other) => Err(ValidationError::invalid_descriptor(
            "Schema",
            format!("argument must be a field set, got {}", other),
        )),
        None => Err(ValidationError::invalid_descriptor(
            "Schema",
            "a field set is required",
        )),
    }
}

fn reject_undeclared(entries: &Map, fields: &Fields) -> ValidationResult<()> {
    for key in entries.keys() {
        let declared = key.as_str().map_or(false, |name| fields.get(name).is_some());
        if !declared {
            return Err(ValidationError::failed("Undeclared key").at_key(&key.to_text()));
        }
    }
    Ok(())
}

fn cast_fields(value: &Value, fields: &Fields) -> ValidationResult<Value> {
    let entries = expect_map(value)?;
    reject_undeclared(entries, fields)?;

    let mut output = Map::new();
    for (name, field) in fields.iter() {
        let item = entries.get_str(name).unwrap_or(&NONE);
        let casted = match field {
            Field::Type(descriptor) => {
                ensure_instance(item, descriptor).and_then(|()| descriptor.cast(item))
            }
            Field::Nested(nested) => cast_fields(item, nested),
        }
        .map_err(|e| e.at_key(name))?;
        output.insert(Value::from(name), casted);
    }
    Ok(Value::Map(output))
}

fn check_fields(value: &Value, fields: &Fields) -> ValidationResult<()> {
    let entries = expect_map(value)?;
    reject_undeclared(entries, fields)?;

    for (name, field) in fields.iter() {
        let item = entries.get_str(name).unwrap_or(&NONE);
        let checked = match field {
            Field::Type(descriptor) => ensure_instance(item, descriptor),
            Field::Nested(nested) => check_fields(item, nested),
        };
        checked.map_err(|e| e.at_key(name))?;
    }
    Ok(())
}

fn schema_cast(value: &Value, arguments: &[Argument]) -> ValidationResult<Value> {
    cast_fields(value, schema_fields(arguments)?)
}

fn schema_check(value: &Value, arguments: &[Argument]) -> ValidationResult<()> {
    check_fields(value, schema_fields(arguments)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{list_of, optional, BOOLEAN, INTEGER, TEXT};
    use serde_json::json;

    fn user_schema() -> Descriptor {
        schema(
            Fields::new()
                .field("name", &TEXT)
                .field("age", optional(&INTEGER))
                .field("active", &BOOLEAN)
                .field("tags", list_of(&TEXT)),
        )
    }

    #[test]
    fn test_valid_document_passes() {
        let doc = Value::from(json!({
            "name": "Alice",
            "age": 30,
            "active": true,
            "tags": ["rust"]
        }));
        assert!(user_schema().check(&doc));
        assert_eq!(user_schema().cast(&doc).unwrap(), doc);
    }

    #[test]
    fn test_missing_optional_field_is_none() {
        let doc = Value::from(json!({"name": "Alice", "active": true, "tags": []}));
        assert!(user_schema().check(&doc));

        let casted = user_schema().cast(&doc).unwrap();
        assert_eq!(casted.as_map().unwrap().get_str("age"), Some(&Value::None));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let doc = Value::from(json!({"active": true, "tags": []}));
        let err = user_schema().validate(&doc).unwrap_err();
        assert_eq!(err.path(), Some("name"));
    }

    #[test]
    fn test_undeclared_key_fails() {
        let doc = Value::from(json!({
            "name": "Alice",
            "active": true,
            "tags": [],
            "unknown_field": "value"
        }));
        let err = user_schema().cast(&doc).unwrap_err();
        assert_eq!(err.path(), Some("unknown_field"));
        assert!(!user_schema().check(&doc));
    }

    #[test]
    fn test_type_mismatch_location() {
        let doc = Value::from(json!({"name": "Alice", "active": true, "tags": ["a", 1]}));
        let err = user_schema().validate(&doc).unwrap_err();
        assert_eq!(err.path(), Some("tags[1]"));
    }

    #[test]
    fn test_nested_fields() {
        let d = schema(
            Fields::new()
                .field("a", &INTEGER)
                .field("b", Fields::new().field("c", &TEXT)),
        );

        let good = Value::from(json!({"a": 1, "b": {"c": "x"}}));
        assert_eq!(d.cast(&good).unwrap(), good);
        assert!(d.check(&good));

        let bad = Value::from(json!({"a": 1, "b": {"c": 2}}));
        assert!(!d.check(&bad));
        let err = d.cast(&bad).unwrap_err();
        assert_eq!(err.path(), Some("b.c"));
    }

    #[test]
    fn test_cast_does_not_coerce_fields() {
        let d = schema(Fields::new().field("a", &TEXT));
        let err = d.cast(&Value::from(json!({"a": 1}))).unwrap_err();
        assert_eq!(err.path(), Some("a"));
        assert!(err.reason().contains("Text"));
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let d = schema(
            Fields::new()
                .field("zeta", &INTEGER)
                .field("alpha", &INTEGER)
                .field("zeta", &TEXT),
        );
        assert_eq!(d.to_string(), "Schema[{\"zeta\": Text, \"alpha\": Integer}]");

        // The first declared field is reported first
        let err = d.cast(&Value::from(json!({}))).unwrap_err();
        assert_eq!(err.path(), Some("zeta"));

        let casted = d.cast(&Value::from(json!({"alpha": 1, "zeta": "z"}))).unwrap();
        let keys: Vec<_> = casted.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec![Value::from("zeta"), Value::from("alpha")]);
    }

    #[test]
    fn test_missing_nested_object_fails() {
        let d = schema(Fields::new().field("b", Fields::new().field("c", &TEXT)));
        let err = d.validate(&Value::from(json!({}))).unwrap_err();
        assert_eq!(err.path(), Some("b"));
        assert!(err.reason().contains("mapping"));
    }

    #[test]
    fn test_non_text_keys_are_undeclared() {
        let d = schema(Fields::new().field("a", optional(&INTEGER)));
        assert!(!d.check(&Value::map([(1, 1)])));
    }

    #[test]
    fn test_schema_requires_fields_argument() {
        let err = SCHEMA.cast(&Value::from(json!({}))).unwrap_err();
        assert_eq!(err.code(), "RUNTYPE_INVALID_DESCRIPTOR");
    }

    #[test]
    fn test_display() {
        let d = schema(
            Fields::new()
                .field("a", &INTEGER)
                .field("b", Fields::new().field("c", &TEXT)),
        );
        assert_eq!(d.to_string(), "Schema[{\"a\": Integer, \"b\": {\"c\": Text}}]");
    }
}
