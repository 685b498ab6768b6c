//! Parameter declarations and argument binding

use crate::descriptor::{ensure_instance, Descriptor, ValidationError, ValidationResult, Value};
use crate::library::ANY;
use crate::observability::{Event, Logger};

/// A declared parameter of a callable.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Declared descriptor; `None` accepts anything
    pub descriptor: Option<Descriptor>,
    /// Value bound when the caller supplies none
    pub default: Option<Value>,
}

impl Parameter {
    /// Create a parameter checked against a descriptor
    pub fn typed(name: impl Into<String>, descriptor: impl Into<Descriptor>) -> Self {
        Self {
            name: name.into(),
            descriptor: Some(descriptor.into()),
            default: None,
        }
    }

    /// Create a parameter without a declared descriptor
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: None,
            default: None,
        }
    }

    /// Attach a default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Returns the declared descriptor, or `Any`
    pub fn descriptor(&self) -> &Descriptor {
        self.descriptor.as_ref().unwrap_or(&*ANY)
    }
}

/// Arguments bound to parameter names, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundArguments {
    values: Vec<(String, Value)>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the values in declaration order
    pub fn into_values(self) -> Vec<Value> {
        self.values.into_iter().map(|(_, v)| v).collect()
    }
}

/// Declared parameters of a callable.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    parameters: Vec<Parameter>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Binds call arguments to parameters.
    ///
    /// # Errors
    ///
    /// Fails on surplus positional arguments, unknown named arguments, and
    /// arguments supplied both positionally and by name.
    pub fn bind(&self, positional: &[Value], named: &[(&str, Value)]) -> ValidationResult<BoundArguments> {
        if positional.len() > self.parameters.len() {
            return Err(ValidationError::failed(format!(
                "Too many positional arguments: expected at most {}, got {}",
                self.parameters.len(),
                positional.len()
            )));
        }

        for (name, _) in named {
            match self.parameters.iter().position(|p| p.name == *name) {
                None => return Err(ValidationError::failed("Unexpected argument").at_key(name)),
                Some(index) if index < positional.len() => {
                    return Err(ValidationError::failed(
                        "Argument given both positionally and by name",
                    )
                    .at_key(name))
                }
                Some(_) => {}
            }
        }

        let values = self
            .parameters
            .iter()
            .enumerate()
            .map(|(index, parameter)| {
                let value = positional
                    .get(index)
                    .or_else(|| {
                        named
                            .iter()
                            .find(|(name, _)| *name == parameter.name)
                            .map(|(_, v)| v)
                    })
                    .or(parameter.default.as_ref())
                    .cloned()
                    .unwrap_or(Value::None);
                (parameter.name.clone(), value)
            })
            .collect();

        Ok(BoundArguments { values })
    }

    /// Binds the arguments and checks each against its parameter's descriptor.
    pub fn check(&self, positional: &[Value], named: &[(&str, Value)]) -> ValidationResult<BoundArguments> {
        let bound = self.bind(positional, named)?;
        for (parameter, (_, value)) in self.parameters.iter().zip(bound.values.iter()) {
            ensure_instance(value, parameter.descriptor())
                .map_err(|err| rejected(parameter, err))?;
        }
        Ok(bound)
    }

    /// Binds the arguments and casts each through its parameter's descriptor.
    pub fn cast(&self, positional: &[Value], named: &[(&str, Value)]) -> ValidationResult<BoundArguments> {
        let bound = self.bind(positional, named)?;
        let values = self
            .parameters
            .iter()
            .zip(bound.values)
            .map(|(parameter, (name, value))| {
                parameter
                    .descriptor()
                    .cast(&value)
                    .map(|casted| (name, casted))
                    .map_err(|err| rejected(parameter, err))
            })
            .collect::<ValidationResult<Vec<_>>>()?;
        Ok(BoundArguments { values })
    }
}

fn rejected(parameter: &Parameter, err: ValidationError) -> ValidationError {
    if Logger::enabled(Event::ArgumentRejected.severity()) {
        let descriptor = parameter.descriptor().to_string();
        let reason = err.reason();
        Logger::event(
            Event::ArgumentRejected,
            &[
                ("argument", parameter.name.as_str()),
                ("descriptor", descriptor.as_str()),
                ("reason", reason.as_str()),
            ],
        );
    }
    err.at_key(&parameter.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{INTEGER, TEXT};

    fn signature() -> Signature {
        Signature::new()
            .parameter(Parameter::untyped("a"))
            .parameter(Parameter::typed("b", &TEXT))
            .parameter(Parameter::untyped("c"))
            .parameter(Parameter::typed("d", &INTEGER).with_default(1))
    }

    #[test]
    fn test_bind_applies_defaults() {
        let bound = signature()
            .bind(&[Value::Int(1), Value::from("2"), Value::Int(3)], &[])
            .unwrap();
        assert_eq!(bound.get("d"), Some(&Value::Int(1)));
        assert_eq!(bound.len(), 4);
    }

    #[test]
    fn test_bind_missing_is_none() {
        let bound = signature().bind(&[Value::Int(1)], &[]).unwrap();
        assert_eq!(bound.get("b"), Some(&Value::None));
        assert_eq!(bound.get("c"), Some(&Value::None));
    }

    #[test]
    fn test_bind_named() {
        let bound = signature()
            .bind(&[Value::Int(1)], &[("b", Value::from("x")), ("d", Value::Int(7))])
            .unwrap();
        assert_eq!(bound.get("b"), Some(&Value::from("x")));
        assert_eq!(bound.get("d"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_bind_rejects_surplus_and_unknown() {
        let five: Vec<Value> = (0..5).map(Value::from).collect();
        assert!(signature().bind(&five, &[]).is_err());

        let err = signature().bind(&[], &[("z", Value::Int(1))]).unwrap_err();
        assert_eq!(err.path(), Some("z"));

        let err = signature()
            .bind(&[Value::Int(1)], &[("a", Value::Int(1))])
            .unwrap_err();
        assert_eq!(err.path(), Some("a"));
    }

    #[test]
    fn test_check_reports_parameter() {
        let err = signature()
            .check(&[Value::Int(1), Value::Int(2), Value::Int(3)], &[])
            .unwrap_err();
        assert_eq!(err.path(), Some("b"));
        assert!(err.reason().contains("Text"));
    }

    #[test]
    fn test_typed_parameter_keeps_descriptor() {
        let parameter = Parameter::typed("x", &INTEGER);
        assert_eq!(parameter.descriptor().name(), "Integer");

        let sig = Signature::new().parameter(parameter);
        let err = sig.check(&[Value::Float(1.5)], &[]).unwrap_err();
        assert_eq!(err.path(), Some("x"));
        assert!(sig.check(&[Value::Int(1)], &[]).is_ok());
    }

    #[test]
    fn test_untyped_parameter_uses_any() {
        let parameter = Parameter::untyped("x");
        assert!(parameter.descriptor.is_none());
        assert_eq!(parameter.descriptor().name(), "Any");
    }

    #[test]
    fn test_cast_transforms() {
        let bound = signature()
            .cast(&[Value::Int(1), Value::Int(2), Value::Int(3)], &[])
            .unwrap();
        assert_eq!(
            bound.into_values(),
            vec![Value::Int(1), Value::from("2"), Value::Int(3), Value::Int(1)]
        );
    }
}
