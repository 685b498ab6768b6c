//! Call argument checking
//!
//! Applies descriptors to the arguments of a call, given the callee's
//! declared parameters:
//! - Arguments bind positionally, then by name, then from defaults
//! - Unsupplied parameters without a default bind to `None`
//! - Parameters without a declared descriptor accept anything
//! - The first failing parameter aborts the call

mod binding;

pub use binding::{BoundArguments, Parameter, Signature};
