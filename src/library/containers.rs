//! Container combinators: List, Mapping and Tuple
//!
//! Casting accepts any compatible container and rebuilds it element by
//! element through the element descriptors. Checking requires the exact
//! container kind and membership of every element.
//!
//! A failing element aborts the whole container; no partial result is
//! returned. The failure location names the offending index or key.

use std::sync::LazyLock;

use crate::descriptor::{ensure_instance, Argument, Descriptor, Map, ValidationError, ValidationResult, Value};

use super::arguments::{expect_map, expect_sequence, type_argument, type_arguments, type_mismatch};

pub static LIST: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("List", list_cast, list_check));

pub static MAPPING: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("Mapping", mapping_cast, mapping_check));

pub static TUPLE: LazyLock<Descriptor> =
    LazyLock::new(|| Descriptor::from_both("Tuple", tuple_cast, tuple_check));

/// `List[item]`
pub fn list_of(item: impl Into<Argument>) -> Descriptor {
    LIST.bind(vec![item.into()])
}

/// `Mapping[key, value]`
pub fn mapping_of(key: impl Into<Argument>, value: impl Into<Argument>) -> Descriptor {
    MAPPING.bind(vec![key.into(), value.into()])
}

/// `Tuple[items...]`
pub fn tuple_of<I>(items: I) -> Descriptor
where
    I: IntoIterator,
    I::Item: Into<Argument>,
{
    TUPLE.bind(items.into_iter().map(Into::into).collect())
}

fn list_cast(value: &Value, arguments: &[Argument]) -> ValidationResult<Value> {
    let item_type = type_argument("List", arguments, 0)?;
    let items = expect_sequence(value)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| item_type.cast(item).map_err(|e| e.at_index(index)))
        .collect::<ValidationResult<Vec<_>>>()
        .map(Value::List)
}

fn list_check(value: &Value, arguments: &[Argument]) -> ValidationResult<()> {
    let item_type = type_argument("List", arguments, 0)?;
    let items = match value {
        Value::List(items) => items,
        other => return Err(type_mismatch("list", other)),
    };

    for (index, item) in items.iter().enumerate() {
        ensure_instance(item, item_type).map_err(|e| e.at_index(index))?;
    }
    Ok(())
}

fn mapping_cast(value: &Value, arguments: &[Argument]) -> ValidationResult<Value> {
    let key_type = type_argument("Mapping", arguments, 0)?;
    let value_type = type_argument("Mapping", arguments, 1)?;
    let entries = expect_map(value)?;

    let mut output = Map::new();
    for (key, item) in entries.iter() {
        let location = key.to_text();
        let key = key_type.cast(key).map_err(|e| e.at_key(&location))?;
        let item = value_type.cast(item).map_err(|e| e.at_key(&location))?;
        output.insert(key, item);
    }
    Ok(Value::Map(output))
}

fn mapping_check(value: &Value, arguments: &[Argument]) -> ValidationResult<()> {
    let key_type = type_argument("Mapping", arguments, 0)?;
    let value_type = type_argument("Mapping", arguments, 1)?;
    let entries = expect_map(value)?;

    for (key, item) in entries.iter() {
        let location = key.to_text();
        ensure_instance(key, key_type).map_err(|e| e.at_key(&location))?;
        ensure_instance(item, value_type).map_err(|e| e.at_key(&location))?;
    }
    Ok(())
}

fn arity_mismatch(actual: usize, expected: usize) -> ValidationError {
    ValidationError::failed(format!(
        "Value length {} does not match {} item types",
        actual, expected
    ))
}

fn tuple_cast(value: &Value, arguments: &[Argument]) -> ValidationResult<Value> {
    let item_types = type_arguments("Tuple", arguments)?;
    let items = expect_sequence(value)?;

    if item_types.is_empty() {
        return Ok(Value::Tuple(items.to_vec()));
    }
    if items.len() != item_types.len() {
        return Err(arity_mismatch(items.len(), item_types.len()));
    }

    items
        .iter()
        .zip(item_types)
        .enumerate()
        .map(|(index, (item, item_type))| item_type.cast(item).map_err(|e| e.at_index(index)))
        .collect::<ValidationResult<Vec<_>>>()
        .map(Value::Tuple)
}

fn tuple_check(value: &Value, arguments: &[Argument]) -> ValidationResult<()> {
    let item_types = type_arguments("Tuple", arguments)?;
    let items = match value {
        Value::Tuple(items) => items,
        other => return Err(type_mismatch("tuple", other)),
    };

    if item_types.is_empty() {
        return Ok(());
    }
    if items.len() != item_types.len() {
        return Err(arity_mismatch(items.len(), item_types.len()));
    }

    for (index, (item, item_type)) in items.iter().zip(item_types).enumerate() {
        ensure_instance(item, item_type).map_err(|e| e.at_index(index))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{union, FLOAT, INTEGER, TEXT};

    #[test]
    fn test_list_of_integers() {
        let d = list_of(&INTEGER);
        let value = Value::list([1, 2, 3]);
        assert_eq!(d.cast(&value).unwrap(), value);
        assert!(d.check(&value));
        assert!(!d.check(&Value::list([Value::from("a"), Value::Int(1)])));
    }

    #[test]
    fn test_unparameterized_list_accepts_anything() {
        let value = Value::list([Value::from("Hello"), Value::from("World"), Value::Int(42)]);
        assert!(LIST.check(&value));
        assert!(!list_of(&TEXT).check(&value));
    }

    #[test]
    fn test_list_cast_from_tuple() {
        let d = list_of(&TEXT);
        assert_eq!(
            d.cast(&Value::tuple([1, 2])).unwrap(),
            Value::list(["1", "2"])
        );
        assert!(!d.check(&Value::tuple(["1", "2"])));
    }

    #[test]
    fn test_list_cast_rejects_scalars() {
        let err = LIST.cast(&Value::from("abc")).unwrap_err();
        assert_eq!(err.reason(), "Value is not a sequence (got text)");
    }

    #[test]
    fn test_list_failure_location() {
        let d = list_of(&INTEGER);
        let err = d.cast(&Value::list([Value::Int(1), Value::from("x")])).unwrap_err();
        assert_eq!(err.path(), Some("[1]"));
    }

    #[test]
    fn test_list_of_union() {
        let d = list_of(union([&TEXT, &INTEGER]));
        let value = Value::list([Value::from("1"), Value::Int(2)]);
        assert_eq!(d.cast(&value).unwrap(), value);
    }

    #[test]
    fn test_mapping() {
        let d = mapping_of(&TEXT, &INTEGER);
        let value = Value::map([("a", 1)]);
        assert_eq!(d.cast(&value).unwrap(), value);

        let texts = mapping_of(&TEXT, &TEXT);
        assert!(texts.check(&Value::map([("hello", "world"), ("test", "test")])));
        let mixed = Value::map([
            (Value::from("hello"), Value::from("world")),
            (Value::from("test"), Value::Int(42)),
        ]);
        assert!(!texts.check(&mixed));
        assert_eq!(texts.validate(&mixed).unwrap_err().path(), Some("test"));
    }

    #[test]
    fn test_mapping_cast_transforms_keys() {
        let d = mapping_of(&TEXT, &ANY_INT_OR_FLOAT);
        let value = Value::map([(Value::Int(1), Value::Float(0.5))]);
        assert_eq!(
            d.cast(&value).unwrap(),
            Value::map([(Value::from("1"), Value::Float(0.5))])
        );
    }

    static ANY_INT_OR_FLOAT: LazyLock<Descriptor> = LazyLock::new(|| union([&INTEGER, &FLOAT]));

    #[test]
    fn test_tuple_without_types() {
        assert_eq!(
            TUPLE.cast(&Value::tuple([1, 2])).unwrap(),
            Value::tuple([1, 2])
        );
        assert_eq!(TUPLE.cast(&Value::list([1, 2])).unwrap(), Value::tuple([1, 2]));
        assert!(TUPLE.check(&Value::tuple(["a"])));
        assert!(!TUPLE.check(&Value::list([1])));
    }

    #[test]
    fn test_tuple_with_types() {
        let pair = tuple_of([&INTEGER, &INTEGER]);
        assert_eq!(pair.cast(&Value::tuple([1, 2])).unwrap(), Value::tuple([1, 2]));
        assert!(pair.cast(&Value::tuple([1, 2, 3])).is_err());

        let triple = tuple_of([&INTEGER, &INTEGER, &INTEGER]);
        assert!(triple.check(&Value::tuple([1, 2, 3])));
        assert!(!triple.check(&Value::from("Hello World")));

        let mixed = Value::tuple([Value::Int(1), Value::Int(2), Value::Int(3), Value::from("Hello World")]);
        assert!(tuple_of([&INTEGER, &INTEGER, &INTEGER, &TEXT]).check(&mixed));
        assert!(!tuple_of([&INTEGER, &INTEGER, &INTEGER, &INTEGER]).check(&mixed));
    }
}
