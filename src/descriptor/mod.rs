//! Descriptor core
//!
//! A descriptor pairs an optional caster with an optional checker and can be
//! parameterized once with arguments.
//!
//! # Design Principles
//!
//! - Every descriptor supports both cast and check, whichever it was built with
//! - Parameterization returns a new descriptor, never mutates
//! - Membership tests never fail, they answer `false`
//! - Descriptors are immutable and shareable across threads

mod descriptor;
mod errors;
mod membership;
mod value;

pub use descriptor::{predicate, typecaster, typechecker, Argument, Caster, Checker, Descriptor};
pub use errors::{ValidationError, ValidationResult};
pub use membership::{ensure_instance, IsInstance};
pub use value::{Map, Value};
