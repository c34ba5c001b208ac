//! Core state contract.
//!
//! This module contains everything a state implementation touches:
//! - Identity keys via the `StateId` trait
//! - Lifecycle hooks via the `State` trait
//! - The `Context` lent to each hook

mod context;
mod identity;
mod state;

pub use context::Context;
pub use identity::StateId;
pub use state::{ExitReason, State};
