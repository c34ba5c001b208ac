//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Owner not specified. Call .owner(owner) before .build()")]
    MissingOwner,

    #[error("No states registered. Add at least one state")]
    NoStates,
}
