//! runcheck - Runtime type validation and coercion
//!
//! Descriptors carry a name, an optional caster and an optional checker:
//! - `cast` transforms a value into a conforming one, or fails
//! - `check` decides membership without transforming
//! - Parameterized descriptors bind type or value arguments once
//!
//! The library module provides primitives (Text, Integer, ...), generic
//! combinators (Optional, Union, List, Schema, ...) and text formats
//! (Charset, Pattern, Domain, Email, Path). The signature module applies
//! descriptors to call arguments.

pub mod descriptor;
pub mod library;
pub mod observability;
pub mod signature;

pub use descriptor::{
    ensure_instance, predicate, typecaster, typechecker, Argument, Descriptor, IsInstance, Map,
    ValidationError, ValidationResult, Value,
};
pub use signature::{BoundArguments, Parameter, Signature};
