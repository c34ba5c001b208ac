//! Machine that owns a state registry and drives the current state.

use super::registry::Registry;
use super::rejection::Rejection;
use crate::builder::MachineBuilder;
use crate::core::{Context, ExitReason, State, StateId};
use std::any::Any;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug)]
enum Hook {
    Init,
    Enter,
    Update,
    Exit(ExitReason),
    Destroy,
}

/// Finite state machine driving one owner's behavior.
///
/// The machine holds one instance per state identity and runs at most one of
/// them at a time. Out-of-contract calls are rejected without side effects;
/// the `try_*` methods say why, the plain methods only report `false`.
///
/// Dropping a live machine disposes it.
pub struct Machine<O: 'static, K: StateId> {
    name: String,
    owner: Option<O>,
    registry: Registry<O, K>,
    current: Option<usize>,
    elapsed: Duration,
    destroyed: bool,
}

impl<O: 'static, K: StateId> Machine<O, K> {
    /// Create a machine and initialize each state, in order.
    ///
    /// States whose identity is already registered are dropped without being
    /// initialized. Returns `None` if `states` is empty.
    pub fn create<I>(name: impl Into<String>, owner: O, states: I) -> Option<Self>
    where
        I: IntoIterator<Item = Box<dyn State<O, K>>>,
    {
        let name = name.into();
        let mut states = states.into_iter().peekable();
        if states.peek().is_none() {
            trace!(machine = %name, "no states supplied, machine not created");
            return None;
        }

        let mut machine = Self {
            name,
            owner: Some(owner),
            registry: Registry::new(),
            current: None,
            elapsed: Duration::ZERO,
            destroyed: false,
        };

        for state in states {
            let id = state.id();
            let Some(slot) = machine.registry.insert(state) else {
                trace!(machine = %machine.name, state = %id.label(), "duplicate state discarded");
                continue;
            };
            let requested = machine.run_hook(slot, Hook::Init);
            machine.follow(requested);
        }

        debug!(
            machine = %machine.name,
            states = machine.registry.len(),
            "machine created"
        );
        Some(machine)
    }

    /// Start configuring a machine.
    pub fn builder() -> MachineBuilder<O, K> {
        MachineBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owner type name joined with the machine name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.owner_type(), self.name)
    }

    pub fn owner_type(&self) -> &'static str {
        std::any::type_name::<O>()
    }

    /// The owner, or `None` once disposed.
    pub fn owner(&self) -> Option<&O> {
        self.owner.as_ref()
    }

    pub fn owner_mut(&mut self) -> Option<&mut O> {
        self.owner.as_mut()
    }

    pub fn state_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn current_state(&self) -> Option<&dyn State<O, K>> {
        self.current
            .and_then(|slot| self.registry.get(slot))
            .map(|entry| &*entry.state)
    }

    pub fn current_state_id(&self) -> Option<K> {
        self.current
            .and_then(|slot| self.registry.get(slot))
            .map(|entry| entry.id)
    }

    pub fn current_state_name(&self) -> Option<&'static str> {
        self.current_state().map(|state| state.name())
    }

    /// Time accumulated since the current state was entered.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn has_state(&self, id: K) -> bool {
        self.registry.slot_of(id).is_some()
    }

    pub fn get_state(&self, id: K) -> Option<&dyn State<O, K>> {
        let slot = self.registry.slot_of(id)?;
        self.registry.get(slot).map(|entry| &*entry.state)
    }

    pub fn get_state_mut(&mut self, id: K) -> Option<&mut (dyn State<O, K> + 'static)> {
        let slot = self.registry.slot_of(id)?;
        self.registry.get_mut(slot).map(|entry| &mut *entry.state)
    }

    /// Look up a registered state as its concrete type.
    ///
    /// Returns `None` if `id` is not registered or is registered with a
    /// different type.
    pub fn state_as<T: State<O, K>>(&self, id: K) -> Option<&T> {
        let slot = self.registry.slot_of(id)?;
        let entry = self.registry.get(slot)?;
        let any: &dyn Any = &*entry.state;
        any.downcast_ref::<T>()
    }

    pub fn state_as_mut<T: State<O, K>>(&mut self, id: K) -> Option<&mut T> {
        let state = self.get_state_mut(id)?;
        let any: &mut dyn Any = state;
        any.downcast_mut::<T>()
    }

    /// Snapshot of all registered states, in registration order.
    pub fn all_states(&self) -> Vec<&dyn State<O, K>> {
        self.registry.iter().map(|entry| &*entry.state).collect()
    }

    /// Clear `out` and fill it with all registered states.
    pub fn collect_states<'a>(&'a self, out: &mut Vec<&'a dyn State<O, K>>) {
        out.clear();
        out.extend(self.registry.iter().map(|entry| &*entry.state));
    }

    /// Identities of all registered states, in registration order.
    pub fn state_ids(&self) -> Vec<K> {
        self.registry.iter().map(|entry| entry.id).collect()
    }

    /// Enter `target` as the first current state.
    ///
    /// Returns `false` without effect if the machine is already running,
    /// disposed, or `target` is not registered.
    pub fn start(&mut self, target: K) -> bool {
        self.try_start(target).is_ok()
    }

    pub fn try_start(&mut self, target: K) -> Result<(), Rejection<K>> {
        if self.destroyed {
            return self.reject(Rejection::Disposed);
        }
        if let Some(current) = self.current_state_id() {
            return self.reject(Rejection::AlreadyRunning { current });
        }
        let Some(slot) = self.registry.slot_of(target) else {
            return self.reject(Rejection::UnknownState(target));
        };

        debug!(machine = %self.name, state = %target.label(), "starting");
        let requested = self.activate(slot);
        self.follow(requested);
        Ok(())
    }

    /// Exit the current state and enter `target`.
    ///
    /// The target's [`State::can_transition`] guard is not consulted.
    /// Returns `false` without effect if the machine is not running or
    /// `target` is not registered.
    pub fn change_state(&mut self, target: K) -> bool {
        self.try_change_state(target).is_ok()
    }

    pub fn try_change_state(&mut self, target: K) -> Result<(), Rejection<K>> {
        let requested = self.transition(target)?;
        self.follow(requested);
        Ok(())
    }

    /// Exit the current state and enter `target`, returning the change
    /// requested by the entered state.
    fn transition(&mut self, target: K) -> Result<Option<K>, Rejection<K>> {
        if self.destroyed {
            return self.reject(Rejection::Disposed);
        }
        let Some(from) = self.current else {
            return self.reject(Rejection::NotRunning);
        };
        let Some(slot) = self.registry.slot_of(target) else {
            return self.reject(Rejection::UnknownState(target));
        };

        if let Some(entry) = self.registry.get(from) {
            debug!(
                machine = %self.name,
                from = %entry.id.label(),
                to = %target.label(),
                "changing state"
            );
        }
        let requested = self.run_hook(from, Hook::Exit(ExitReason::Transition));
        self.discard(requested);
        Ok(self.activate(slot))
    }

    /// Advance the current state's timer by `elapsed` and tick it.
    ///
    /// Returns `false` without effect if the machine is not running.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        self.try_update(elapsed).is_ok()
    }

    pub fn try_update(&mut self, elapsed: Duration) -> Result<(), Rejection<K>> {
        if self.destroyed {
            return self.reject(Rejection::Disposed);
        }
        let Some(slot) = self.current else {
            return self.reject(Rejection::NotRunning);
        };

        self.elapsed = self.elapsed.saturating_add(elapsed);
        let requested = self.run_hook(slot, Hook::Update);
        self.follow(requested);
        Ok(())
    }

    /// Ask `target`'s guard whether it would accept becoming current now.
    ///
    /// Purely advisory: `change_state` never calls this. Takes `&mut self`
    /// because the guard sees the same [`Context`] as every other hook, and
    /// a context lends the owner mutably.
    pub fn can_enter(&mut self, target: K) -> Result<bool, Rejection<K>> {
        if self.destroyed {
            return self.reject(Rejection::Disposed);
        }
        let Some(slot) = self.registry.slot_of(target) else {
            return self.reject(Rejection::UnknownState(target));
        };

        let current = self.current_state_id();
        let Self {
            name,
            owner,
            registry,
            elapsed,
            ..
        } = self;
        let (Some(owner), Some(entry)) = (owner.as_mut(), registry.get(slot)) else {
            return Err(Rejection::UnknownState(target));
        };
        let ctx = Context::new(name.as_str(), owner, current, *elapsed);
        Ok(entry.state.can_transition(&ctx))
    }

    /// Tear the machine down.
    ///
    /// Exits the current state with [`ExitReason::Shutdown`], destroys every
    /// registered state in registration order, then drops the states and
    /// hands the owner back to the caller. Calling this again has no further
    /// effect and returns `None`.
    pub fn dispose(&mut self) -> Option<O> {
        let live = !self.destroyed;

        if let Some(slot) = self.current {
            let requested = self.run_hook(slot, Hook::Exit(ExitReason::Shutdown));
            self.discard(requested);
        }
        for slot in 0..self.registry.len() {
            let requested = self.run_hook(slot, Hook::Destroy);
            self.discard(requested);
        }

        self.registry.clear();
        let owner = self.owner.take();
        self.current = None;
        self.elapsed = Duration::ZERO;
        self.destroyed = true;

        if live {
            debug!(machine = %self.name, "machine disposed");
        }
        owner
    }

    fn activate(&mut self, slot: usize) -> Option<K> {
        self.elapsed = Duration::ZERO;
        self.current = Some(slot);
        self.run_hook(slot, Hook::Enter)
    }

    /// Invoke one hook on the state in `slot`, returning its change request.
    fn run_hook(&mut self, slot: usize, hook: Hook) -> Option<K> {
        let Self {
            name,
            owner,
            registry,
            current,
            elapsed,
            ..
        } = self;
        let name = name.as_str();
        let owner = owner.as_mut()?;
        let current = current
            .and_then(|idx| registry.get(idx))
            .map(|entry| entry.id);
        let entry = registry.get_mut(slot)?;

        trace!(machine = %name, state = %entry.id.label(), ?hook, "dispatching");
        let mut ctx = Context::new(name, owner, current, *elapsed);
        match hook {
            Hook::Init => entry.state.init(&mut ctx),
            Hook::Enter => entry.state.enter(&mut ctx),
            Hook::Update => entry.state.update(&mut ctx),
            Hook::Exit(reason) => entry.state.exit(&mut ctx, reason),
            Hook::Destroy => entry.state.destroy(&mut ctx),
        }
        ctx.into_request()
    }

    /// Apply change requests until an entered state makes none.
    fn follow(&mut self, mut requested: Option<K>) {
        while let Some(target) = requested.take() {
            // rejection already traced
            requested = self.transition(target).ok().flatten();
        }
    }

    fn discard(&self, requested: Option<K>) {
        if let Some(target) = requested {
            trace!(
                machine = %self.name,
                state = %target.label(),
                "change request during exit or destroy ignored"
            );
        }
    }

    fn reject<T>(&self, rejection: Rejection<K>) -> Result<T, Rejection<K>> {
        trace!(machine = %self.name, %rejection, "call rejected");
        Err(rejection)
    }
}

impl<O: 'static, K: StateId> Drop for Machine<O, K> {
    fn drop(&mut self) {
        if !self.destroyed {
            self.dispose();
        }
    }
}

impl<O: 'static, K: StateId> fmt::Debug for Machine<O, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("states", &self.state_ids())
            .field("current", &self.current_state_id())
            .field("elapsed", &self.elapsed)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
