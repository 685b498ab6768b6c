//! The descriptor: a named, immutable, optionally parameterized validator.
//!
//! A descriptor is built from a caster, a checker, or both:
//! - `cast` runs the caster, or falls back to check-then-return-original.
//! - `validate` runs the checker, or falls back to casting and comparing the
//!   result with the original value.
//!
//! Parameterization never mutates; it returns a new descriptor sharing the
//! same caster, checker and name.

use std::fmt;
use std::sync::{Arc, LazyLock};

use super::errors::{ValidationError, ValidationResult};
use super::value::Value;
use crate::library::{Fields, PatternFlags};
use crate::observability::{Event, Logger};

/// Casting function: receives the value and the bound arguments.
pub type Caster = Arc<dyn Fn(&Value, &[Argument]) -> ValidationResult<Value> + Send + Sync>;

/// Checking function: receives the value and the bound arguments.
pub type Checker = Arc<dyn Fn(&Value, &[Argument]) -> ValidationResult<()> + Send + Sync>;

/// A parameter bound to a descriptor.
#[derive(Clone, Debug)]
pub enum Argument {
    /// A nested descriptor (element type, union member, ...)
    Type(Descriptor),
    /// A plain value (literal member, charset alphabet, regex source, ...)
    Value(Value),
    /// Declared schema fields
    Fields(Fields),
    /// Regex flags for pattern descriptors
    Flags(PatternFlags),
}

impl Argument {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Argument::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Type(d) => write!(f, "{}", d),
            Argument::Value(v) => write!(f, "{}", v),
            Argument::Fields(fields) => write!(f, "{}", fields),
            Argument::Flags(flags) => write!(f, "{}", flags),
        }
    }
}

impl From<Descriptor> for Argument {
    fn from(d: Descriptor) -> Self {
        Argument::Type(d)
    }
}

impl From<&Descriptor> for Argument {
    fn from(d: &Descriptor) -> Self {
        Argument::Type(d.clone())
    }
}

impl From<&LazyLock<Descriptor>> for Argument {
    fn from(d: &LazyLock<Descriptor>) -> Self {
        Argument::Type(Descriptor::clone(d))
    }
}

impl From<Value> for Argument {
    fn from(v: Value) -> Self {
        Argument::Value(v)
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Argument::Value(Value::from(s))
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Argument::Value(Value::Text(s))
    }
}

impl From<i64> for Argument {
    fn from(i: i64) -> Self {
        Argument::Value(Value::Int(i))
    }
}

impl From<i32> for Argument {
    fn from(i: i32) -> Self {
        Argument::Value(Value::from(i))
    }
}

impl From<f64> for Argument {
    fn from(x: f64) -> Self {
        Argument::Value(Value::Float(x))
    }
}

impl From<bool> for Argument {
    fn from(b: bool) -> Self {
        Argument::Value(Value::Bool(b))
    }
}

impl From<Fields> for Argument {
    fn from(fields: Fields) -> Self {
        Argument::Fields(fields)
    }
}

impl From<PatternFlags> for Argument {
    fn from(flags: PatternFlags) -> Self {
        Argument::Flags(flags)
    }
}

/// A composable type validator.
///
/// Cloning is cheap: the name, functions and arguments are shared.
#[derive(Clone)]
pub struct Descriptor {
    name: Arc<str>,
    caster: Option<Caster>,
    checker: Option<Checker>,
    arguments: Arc<[Argument]>,
}

impl Descriptor {
    /// Creates a descriptor from an optional caster and an optional checker.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDescriptor` if neither is provided.
    pub fn new(
        name: impl Into<String>,
        caster: Option<Caster>,
        checker: Option<Checker>,
    ) -> ValidationResult<Self> {
        let name = name.into();
        if caster.is_none() && checker.is_none() {
            Logger::event(Event::DescriptorRejected, &[("name", name.as_str())]);
            return Err(ValidationError::invalid_descriptor(
                name,
                "a caster or a checker is required",
            ));
        }

        Ok(Self {
            name: Arc::from(name),
            caster,
            checker,
            arguments: Arc::from(Vec::new()),
        })
    }

    /// Creates a caster-only descriptor.
    pub fn from_caster<F>(name: impl Into<String>, caster: F) -> Self
    where
        F: Fn(&Value, &[Argument]) -> ValidationResult<Value> + Send + Sync + 'static,
    {
        Self::from_parts(name, Some(Arc::new(caster)), None)
    }

    /// Creates a checker-only descriptor.
    pub fn from_checker<F>(name: impl Into<String>, checker: F) -> Self
    where
        F: Fn(&Value, &[Argument]) -> ValidationResult<()> + Send + Sync + 'static,
    {
        Self::from_parts(name, None, Some(Arc::new(checker)))
    }

    /// Creates a descriptor with both a caster and a checker.
    pub fn from_both<C, K>(name: impl Into<String>, caster: C, checker: K) -> Self
    where
        C: Fn(&Value, &[Argument]) -> ValidationResult<Value> + Send + Sync + 'static,
        K: Fn(&Value, &[Argument]) -> ValidationResult<()> + Send + Sync + 'static,
    {
        Self::from_parts(name, Some(Arc::new(caster)), Some(Arc::new(checker)))
    }

    // At least one of caster/checker is Some at every call site.
    fn from_parts(name: impl Into<String>, caster: Option<Caster>, checker: Option<Checker>) -> Self {
        Self {
            name: Arc::from(name.into()),
            caster,
            checker,
            arguments: Arc::from(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn is_parameterized(&self) -> bool {
        !self.arguments.is_empty()
    }

    pub fn has_caster(&self) -> bool {
        self.caster.is_some()
    }

    pub fn has_checker(&self) -> bool {
        self.checker.is_some()
    }

    /// Binds a single argument.
    pub fn with_argument(&self, argument: impl Into<Argument>) -> ValidationResult<Self> {
        self.with_arguments(vec![argument.into()])
    }

    /// Binds a sequence of arguments verbatim.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyParameterized` if this descriptor already carries
    /// arguments.
    pub fn with_arguments<I>(&self, arguments: I) -> ValidationResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<Argument>,
    {
        if self.is_parameterized() {
            let descriptor = self.to_string();
            Logger::event(
                Event::DescriptorReparameterized,
                &[("descriptor", descriptor.as_str())],
            );
            return Err(ValidationError::AlreadyParameterized { descriptor });
        }

        Ok(self.bind(arguments.into_iter().map(Into::into).collect()))
    }

    /// Binds arguments without the parameterization guard.
    ///
    /// Only for built-in constructors whose receiver is known to be
    /// unparameterized.
    pub(crate) fn bind(&self, arguments: Vec<Argument>) -> Self {
        Self {
            name: Arc::clone(&self.name),
            caster: self.caster.clone(),
            checker: self.checker.clone(),
            arguments: Arc::from(arguments),
        }
    }

    /// Casts a value into its canonical conforming form.
    pub fn cast(&self, value: &Value) -> ValidationResult<Value> {
        match &self.caster {
            Some(caster) => caster(value, &self.arguments),
            None => {
                self.validate(value)?;
                Ok(value.clone())
            }
        }
    }

    /// Validates a value, reporting why it does not conform.
    pub fn validate(&self, value: &Value) -> ValidationResult<()> {
        match &self.checker {
            Some(checker) => checker(value, &self.arguments),
            None => {
                let casted = self.cast(value)?;
                if casted != *value {
                    return Err(ValidationError::failed(format!(
                        "Casted value does not equal given value for {}",
                        self
                    )));
                }
                Ok(())
            }
        }
    }

    /// Membership test: never fails, any validation error means `false`.
    pub fn check(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_parameterized() {
            write!(f, "[")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", argument)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl From<&Descriptor> for Descriptor {
    fn from(d: &Descriptor) -> Self {
        d.clone()
    }
}

impl From<&LazyLock<Descriptor>> for Descriptor {
    fn from(d: &LazyLock<Descriptor>) -> Self {
        Descriptor::clone(d)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Descriptor({})", self)
    }
}

/// Promotes a validation function into a checker-only descriptor.
pub fn typechecker<F>(name: impl Into<String>, checker: F) -> Descriptor
where
    F: Fn(&Value, &[Argument]) -> ValidationResult<()> + Send + Sync + 'static,
{
    Descriptor::from_checker(name, checker)
}

/// Promotes a casting function into a caster-only descriptor.
pub fn typecaster<F>(name: impl Into<String>, caster: F) -> Descriptor
where
    F: Fn(&Value, &[Argument]) -> ValidationResult<Value> + Send + Sync + 'static,
{
    Descriptor::from_caster(name, caster)
}

/// Promotes a boolean predicate into a checker-only descriptor.
pub fn predicate<F>(name: impl Into<String>, predicate: F) -> Descriptor
where
    F: Fn(&Value, &[Argument]) -> bool + Send + Sync + 'static,
{
    let name = name.into();
    let label = name.clone();
    Descriptor::from_checker(name, move |value, arguments| {
        if predicate(value, arguments) {
            Ok(())
        } else {
            Err(ValidationError::failed(format!(
                "Value {} does not satisfy {}",
                value, label
            )))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even() -> Descriptor {
        predicate("Even", |value, _| matches!(value, Value::Int(i) if i % 2 == 0))
    }

    fn upper() -> Descriptor {
        typecaster("Upper", |value, _| match value {
            Value::Text(s) => Ok(Value::Text(s.to_uppercase())),
            other => Err(ValidationError::failed(format!(
                "Cannot uppercase {}",
                other.type_name()
            ))),
        })
    }

    #[test]
    fn test_new_requires_caster_or_checker() {
        let err = Descriptor::new("Empty", None, None).unwrap_err();
        assert_eq!(err.code(), "RUNTYPE_INVALID_DESCRIPTOR");
        assert!(err.to_string().contains("Empty"));
    }

    #[test]
    fn test_new_with_checker() {
        let checker: Checker = Arc::new(|_, _| Ok(()));
        let d = Descriptor::new("Anything", None, Some(checker)).unwrap();
        assert!(d.has_checker());
        assert!(!d.has_caster());
    }

    #[test]
    fn test_checker_only_cast_returns_original() {
        let d = even();
        assert_eq!(d.cast(&Value::Int(4)).unwrap(), Value::Int(4));
        assert!(d.cast(&Value::Int(3)).is_err());
    }

    #[test]
    fn test_caster_only_check_uses_round_trip() {
        let d = upper();
        assert!(d.check(&Value::from("ABC")));
        assert!(!d.check(&Value::from("abc")));
        assert!(!d.check(&Value::Int(1)));
        assert_eq!(d.cast(&Value::from("abc")).unwrap(), Value::from("ABC"));
    }

    #[test]
    fn test_parameterization_is_pure() {
        let base = typechecker("Below", |value, arguments| {
            let limit = match arguments.first().and_then(Argument::as_value) {
                Some(Value::Int(limit)) => *limit,
                _ => i64::MAX,
            };
            match value {
                Value::Int(i) if *i < limit => Ok(()),
                _ => Err(ValidationError::failed("too large")),
            }
        });

        let below_10 = base.with_argument(10).unwrap();
        let below_3 = base.with_argument(3).unwrap();

        assert!(!base.is_parameterized());
        assert!(base.check(&Value::Int(100)));
        assert!(below_10.check(&Value::Int(5)));
        assert!(!below_3.check(&Value::Int(5)));
    }

    #[test]
    fn test_double_parameterization_fails() {
        let d = even().with_argument(1).unwrap();
        let err = d.with_argument(2).unwrap_err();
        assert_eq!(err.code(), "RUNTYPE_ALREADY_PARAMETERIZED");
        assert!(err.to_string().contains("Even[1]"));
    }

    #[test]
    fn test_empty_arguments_leave_descriptor_unparameterized() {
        let d = even().with_arguments(Vec::<Argument>::new()).unwrap();
        assert!(!d.is_parameterized());
        assert!(d.with_argument(1).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(even().to_string(), "Even");
        let d = even()
            .with_arguments(vec![Argument::from("a"), Argument::from(2)])
            .unwrap();
        assert_eq!(d.to_string(), "Even[\"a\", 2]");
    }
}
