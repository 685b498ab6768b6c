//! Observability
//!
//! Structured JSON logging for the few events worth reporting: descriptor
//! misuse and rejected call arguments.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation results
//! 3. Deterministic output
//! 4. `cast`/`check` never log

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Record, Severity};
