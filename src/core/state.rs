//! Core State trait for machine states.
//!
//! Every hook has a no-op default, so a state only implements the parts of
//! the lifecycle it cares about. Hooks are only ever invoked by the owning
//! [`Machine`](crate::Machine), synchronously and on the calling thread.

use super::context::Context;
use super::identity::StateId;
use std::any::Any;

/// Why a state is being exited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExitReason {
    /// The machine is changing to another state.
    Transition,

    /// The machine is being disposed while this state was current.
    Shutdown,
}

impl ExitReason {
    pub fn is_shutdown(self) -> bool {
        matches!(self, Self::Shutdown)
    }
}

/// Trait for machine states.
///
/// A state instance belongs to exactly one machine. Its lifecycle is
/// `init` once at registration, then any number of `enter` / `update`* /
/// `exit` cycles, then `destroy` once when the machine is disposed, whether
/// or not it was ever entered.
///
/// # Example
///
/// ```rust
/// use tickfsm::{Context, Machine, State, StateId};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Light {
///     Off,
///     On,
/// }
///
/// impl StateId for Light {}
///
/// struct Off;
/// struct On {
///     ticks: u32,
/// }
///
/// impl State<u32, Light> for Off {
///     fn id(&self) -> Light {
///         Light::Off
///     }
/// }
///
/// impl State<u32, Light> for On {
///     fn id(&self) -> Light {
///         Light::On
///     }
///
///     fn enter(&mut self, _ctx: &mut Context<'_, u32, Light>) {
///         self.ticks = 0;
///     }
///
///     fn update(&mut self, ctx: &mut Context<'_, u32, Light>) {
///         self.ticks += 1;
///         *ctx.owner_mut() += 1;
///     }
/// }
///
/// let mut machine = Machine::create(
///     "lamp",
///     0u32,
///     vec![
///         Box::new(Off) as Box<dyn State<u32, Light>>,
///         Box::new(On { ticks: 0 }),
///     ],
/// )
/// .unwrap();
///
/// machine.start(Light::On);
/// machine.update(std::time::Duration::from_millis(16));
/// assert_eq!(machine.owner(), Some(&1));
/// ```
pub trait State<O: 'static, K: StateId>: Any {
    /// Identity this state is registered under.
    fn id(&self) -> K;

    /// Name for display/logging.
    ///
    /// Default implementation returns the implementing type's name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called once, when the state is registered with its machine.
    fn init(&mut self, _ctx: &mut Context<'_, O, K>) {}

    /// Called each time this state becomes current.
    fn enter(&mut self, _ctx: &mut Context<'_, O, K>) {}

    /// Called once per tick while this state is current. Must not block.
    fn update(&mut self, _ctx: &mut Context<'_, O, K>) {}

    /// Called when this state stops being current.
    fn exit(&mut self, _ctx: &mut Context<'_, O, K>, _reason: ExitReason) {}

    /// Called once, when the owning machine is disposed.
    fn destroy(&mut self, _ctx: &mut Context<'_, O, K>) {}

    /// Advisory guard: may this state become current?
    ///
    /// `ctx.current()` is the state the machine would leave. The machine
    /// never consults this on its own; see
    /// [`Machine::can_enter`](crate::Machine::can_enter).
    ///
    /// Default implementation always permits.
    fn can_transition(&self, _ctx: &Context<'_, O, K>) -> bool {
        true
    }
}
