//! Context handed to state lifecycle hooks.

use super::identity::StateId;
use std::time::Duration;

/// Non-owning view of the machine passed into every lifecycle hook.
///
/// States never keep a reference to their machine. Everything a hook may
/// need (the owner, the current identity, elapsed time) is lent through this
/// context for the duration of the call, and transition requests are
/// recorded here and applied by the machine once the hook returns.
pub struct Context<'a, O, K: StateId> {
    machine: &'a str,
    owner: &'a mut O,
    current: Option<K>,
    elapsed: Duration,
    requested: Option<K>,
}

impl<'a, O, K: StateId> Context<'a, O, K> {
    pub(crate) fn new(
        machine: &'a str,
        owner: &'a mut O,
        current: Option<K>,
        elapsed: Duration,
    ) -> Self {
        Self {
            machine,
            owner,
            current,
            elapsed,
            requested: None,
        }
    }

    /// Name of the machine dispatching the hook.
    pub fn machine_name(&self) -> &str {
        self.machine
    }

    /// The context the machine acts on behalf of.
    pub fn owner(&self) -> &O {
        &*self.owner
    }

    pub fn owner_mut(&mut self) -> &mut O {
        &mut *self.owner
    }

    /// Identity of the current state, if the machine is running.
    ///
    /// During `enter` this is already the entering state; during `exit` it is
    /// still the leaving one.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Time accumulated in the current state.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Ask the machine to change to `target` once this hook returns.
    ///
    /// Only the last request made during a hook is kept. The request goes
    /// through [`Machine::change_state`](crate::Machine::change_state), so it
    /// is silently dropped if the machine is not running or `target` is not
    /// registered.
    ///
    /// An entered state that requests a change hands control on right away,
    /// and the machine keeps following requests until an entered state makes
    /// none. Two states whose `enter` hooks request each other never settle,
    /// so the call that entered the first of them does not return.
    pub fn change_state(&mut self, target: K) {
        self.requested = Some(target);
    }

    /// The pending transition request, if any.
    pub fn requested(&self) -> Option<K> {
        self.requested
    }

    pub(crate) fn into_request(self) -> Option<K> {
        self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_exposes_machine_view() {
        let mut owner = 5u32;
        let ctx = Context::new("mob", &mut owner, Some(2u8), Duration::from_millis(250));

        assert_eq!(ctx.machine_name(), "mob");
        assert_eq!(*ctx.owner(), 5);
        assert_eq!(ctx.current(), Some(2));
        assert_eq!(ctx.elapsed(), Duration::from_millis(250));
        assert_eq!(ctx.requested(), None);
    }

    #[test]
    fn owner_is_mutable_through_context() {
        let mut owner = vec![1, 2];
        {
            let mut ctx: Context<'_, Vec<i32>, u8> =
                Context::new("mob", &mut owner, None, Duration::ZERO);
            ctx.owner_mut().push(3);
        }
        assert_eq!(owner, vec![1, 2, 3]);
    }

    #[test]
    fn last_change_request_wins() {
        let mut owner = 0u8;
        let mut ctx = Context::new("mob", &mut owner, Some(1u8), Duration::ZERO);

        ctx.change_state(2);
        ctx.change_state(3);

        assert_eq!(ctx.requested(), Some(3));
        assert_eq!(ctx.into_request(), Some(3));
    }
}
