//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder and an identity macro for creating
//! machines with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
