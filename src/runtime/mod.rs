//! The machine container.
//!
//! This module owns the state registry and all lifecycle dispatch:
//! - `Machine` runs one current state and drives its hooks
//! - `Rejection` names why a call had no effect
//!
//! Every hook runs synchronously on the calling thread before the triggering
//! operation returns. The machine has no internal clock, scheduling or
//! synchronization; a multithreaded host must serialize calls into it.

mod machine;
mod registry;
mod rejection;

pub use machine::Machine;
pub use rejection::Rejection;
