//! Reasons a machine operation had no effect.

use crate::core::StateId;
use thiserror::Error;

/// Why a lifecycle call was rejected.
///
/// A rejected call leaves the machine exactly as it was. The collapsed
/// methods (`start`, `change_state`, `update`) report this only as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection<K: StateId> {
    #[error("Machine has been disposed")]
    Disposed,

    #[error("Machine is already running in state {current:?}")]
    AlreadyRunning { current: K },

    #[error("Machine is not running")]
    NotRunning,

    #[error("State {0:?} is not registered")]
    UnknownState(K),
}
