//! Tickfsm: an embeddable, tick-driven finite state machine runtime
//!
//! A [`Machine`] holds a fixed registry of mutually exclusive states for some
//! owner and drives exactly one current state at a time through a strict
//! lifecycle: `init` → (`enter` → `update`* → `exit`)* → `destroy`.
//! Transitions are requested by callers (or by states, through their
//! [`Context`]); nothing is rule-evaluated.
//!
//! # Core Concepts
//!
//! - **State**: A behavior unit implementing lifecycle hooks via the `State` trait
//! - **Identity**: The `StateId` key a state registers under; one state per key
//! - **Machine**: The container enforcing the single-current-state invariant
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tickfsm::{state_id, Context, ExitReason, Machine, State};
//!
//! state_id! {
//!     enum Gait {
//!         Idle,
//!         Walking,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Walker {
//!     steps: u32,
//!     log: Vec<String>,
//! }
//!
//! struct Idle;
//! struct Walking;
//!
//! impl State<Walker, Gait> for Idle {
//!     fn id(&self) -> Gait {
//!         Gait::Idle
//!     }
//! }
//!
//! impl State<Walker, Gait> for Walking {
//!     fn id(&self) -> Gait {
//!         Gait::Walking
//!     }
//!
//!     fn update(&mut self, ctx: &mut Context<'_, Walker, Gait>) {
//!         ctx.owner_mut().steps += 1;
//!     }
//!
//!     fn exit(&mut self, ctx: &mut Context<'_, Walker, Gait>, reason: ExitReason) {
//!         ctx.owner_mut().log.push(format!("stopped walking: {reason:?}"));
//!     }
//! }
//!
//! let mut machine = Machine::builder()
//!     .name("walker")
//!     .owner(Walker::default())
//!     .state(Idle)
//!     .state(Walking)
//!     .build()
//!     .unwrap();
//!
//! machine.start(Gait::Idle);
//! machine.change_state(Gait::Walking);
//! machine.update(Duration::from_millis(200));
//! machine.update(Duration::from_millis(200));
//!
//! assert_eq!(machine.owner().unwrap().steps, 2);
//! assert_eq!(machine.elapsed(), Duration::from_millis(400));
//!
//! machine.dispose();
//! assert!(machine.is_destroyed());
//! assert_eq!(machine.state_count(), 0);
//! ```

extern crate self as tickfsm;

pub mod builder;
pub mod core;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use core::{Context, ExitReason, State, StateId};
pub use runtime::{Machine, Rejection};

#[doc(hidden)]
pub use serde as __serde;
