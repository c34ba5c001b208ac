//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{State, StateId};
use crate::runtime::Machine;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing machines with a fluent API.
pub struct MachineBuilder<O: 'static, K: StateId> {
    name: String,
    owner: Option<O>,
    states: Vec<Box<dyn State<O, K>>>,
}

impl<O: 'static, K: StateId> MachineBuilder<O, K> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            owner: None,
            states: Vec::new(),
        }
    }

    /// Set the display name. Defaults to the empty string.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the owner (required).
    pub fn owner(mut self, owner: O) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Register a state.
    pub fn state<S: State<O, K>>(self, state: S) -> Self {
        self.boxed_state(Box::new(state))
    }

    pub fn boxed_state(mut self, state: Box<dyn State<O, K>>) -> Self {
        self.states.push(state);
        self
    }

    /// Register several boxed states at once.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn State<O, K>>>,
    {
        self.states.extend(states);
        self
    }

    /// Check the configuration, reporting every problem at once.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let owner = if self.owner.is_some() {
            Validation::success(())
        } else {
            Validation::fail(BuildError::MissingOwner)
        };
        let states = if self.states.is_empty() {
            Validation::fail(BuildError::NoStates)
        } else {
            Validation::success(())
        };

        Validation::all_vec(vec![owner, states]).map(|_| ())
    }

    /// Build the machine, initializing every registered state.
    /// Returns the first missing requirement as an error.
    pub fn build(self) -> Result<Machine<O, K>, BuildError> {
        let owner = self.owner.ok_or(BuildError::MissingOwner)?;
        Machine::create(self.name, owner, self.states).ok_or(BuildError::NoStates)
    }
}

impl<O: 'static, K: StateId> Default for MachineBuilder<O, K> {
    fn default() -> Self {
        Self::new()
    }
}
