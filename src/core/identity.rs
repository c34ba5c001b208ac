//! Identity keys for registered states.
//!
//! A machine holds at most one state per identity. Identities are small,
//! copyable values (usually a fieldless enum generated with
//! [`state_id!`](crate::state_id)) rather than runtime type information.

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

/// Key distinguishing one state variant from another within a machine.
///
/// Two state instances reporting the same identity are "the same kind of
/// state": only the first one registered is kept.
///
/// # Example
///
/// ```rust
/// use tickfsm::StateId;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl StateId for Door {}
///
/// assert_eq!(Door::Open.label(), "Open");
/// ```
pub trait StateId: Copy + Eq + Hash + Debug + 'static {
    /// Human-readable label for logging and display.
    ///
    /// Default implementation renders the `Debug` form.
    fn label(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{self:?}"))
    }
}

macro_rules! impl_state_id {
    ($($ty:ty),* $(,)?) => {
        $(impl StateId for $ty {})*
    };
}

impl_state_id!(u8, u16, u32, u64, usize, i32, i64, char);

impl StateId for &'static str {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(*self)
    }
}
