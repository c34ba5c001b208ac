//! Locomotion State Machine
//!
//! This demo drives a character's gait through a tick loop.
//!
//! Key concepts:
//! - States only implement the hooks they need
//! - The owner is reached through the hook context
//! - States request their own transitions after enough elapsed time
//! - Disposal exits the current state and destroys every state
//!
//! Run with: RUST_LOG=tickfsm=trace cargo run --example locomotion

use std::time::Duration;
use tickfsm::{state_id, Context, ExitReason, Machine, State};
use tracing_subscriber::EnvFilter;

state_id! {
    enum Gait {
        Idle,
        Walking,
        Running,
    }
}

#[derive(Debug, Default)]
struct Character {
    speed: f32,
    distance: f32,
}

struct Idle;

impl State<Character, Gait> for Idle {
    fn id(&self) -> Gait {
        Gait::Idle
    }

    fn enter(&mut self, ctx: &mut Context<'_, Character, Gait>) {
        ctx.owner_mut().speed = 0.0;
    }

    fn update(&mut self, ctx: &mut Context<'_, Character, Gait>) {
        if ctx.elapsed() >= Duration::from_millis(300) {
            ctx.change_state(Gait::Walking);
        }
    }
}

struct Walking;

impl State<Character, Gait> for Walking {
    fn id(&self) -> Gait {
        Gait::Walking
    }

    fn enter(&mut self, ctx: &mut Context<'_, Character, Gait>) {
        ctx.owner_mut().speed = 1.4;
    }

    fn update(&mut self, ctx: &mut Context<'_, Character, Gait>) {
        let owner = ctx.owner_mut();
        owner.distance += owner.speed * 0.1;
        if ctx.elapsed() >= Duration::from_millis(500) {
            ctx.change_state(Gait::Running);
        }
    }
}

struct Running {
    sprints: u32,
}

impl State<Character, Gait> for Running {
    fn id(&self) -> Gait {
        Gait::Running
    }

    fn enter(&mut self, ctx: &mut Context<'_, Character, Gait>) {
        self.sprints += 1;
        ctx.owner_mut().speed = 4.0;
    }

    fn update(&mut self, ctx: &mut Context<'_, Character, Gait>) {
        let owner = ctx.owner_mut();
        owner.distance += owner.speed * 0.1;
    }

    fn exit(&mut self, _ctx: &mut Context<'_, Character, Gait>, reason: ExitReason) {
        println!("  Running exited (shutdown: {})", reason.is_shutdown());
    }

    fn destroy(&mut self, _ctx: &mut Context<'_, Character, Gait>) {
        println!("  Running destroyed after {} sprint(s)", self.sprints);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Locomotion State Machine Demo ===\n");

    let mut machine = Machine::builder()
        .name("legs")
        .owner(Character::default())
        .state(Idle)
        .state(Walking)
        .state(Running { sprints: 0 })
        .build()
        .expect("owner and states are set");

    println!("Machine: {}", machine.full_name());
    println!("Registered states: {:?}\n", machine.state_ids());

    machine.start(Gait::Idle);
    for tick in 0..15 {
        machine.update(Duration::from_millis(100));
        if let (Some(gait), Some(character)) = (machine.current_state_id(), machine.owner()) {
            println!(
                "tick {tick:>2}: {gait:<8} elapsed {:>4}ms distance {:.2}",
                machine.elapsed().as_millis(),
                character.distance
            );
        }
    }

    if let Some(running) = machine.state_as::<Running>(Gait::Running) {
        println!("\nSprints so far: {}", running.sprints);
    }

    println!("\nDisposing:");
    if let Some(character) = machine.dispose() {
        println!("Final distance: {:.2}", character.distance);
    }
    println!("Destroyed: {}", machine.is_destroyed());

    println!("\n=== Demo Complete ===");
}
