//! End-to-end lifecycle scenarios driven through the public API.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tickfsm::{state_id, Context, ExitReason, Machine, Rejection, State};

state_id! {
    enum Locomotion {
        Idle,
        Walking,
        Running,
    }
}

/// Owner handle shared with the test so the journal survives disposal.
#[derive(Clone, Default)]
struct Actor {
    journal: Rc<RefCell<Vec<String>>>,
}

impl Actor {
    fn log(&self, line: String) {
        self.journal.borrow_mut().push(line);
    }

    fn drain(&self) -> Vec<String> {
        self.journal.borrow_mut().drain(..).collect()
    }
}

struct Recorder(Locomotion);

impl State<Actor, Locomotion> for Recorder {
    fn id(&self) -> Locomotion {
        self.0
    }

    fn init(&mut self, ctx: &mut Context<'_, Actor, Locomotion>) {
        ctx.owner().log(format!("init {}", self.0));
    }

    fn enter(&mut self, ctx: &mut Context<'_, Actor, Locomotion>) {
        ctx.owner().log(format!("enter {}", self.0));
    }

    fn exit(&mut self, ctx: &mut Context<'_, Actor, Locomotion>, reason: ExitReason) {
        ctx.owner()
            .log(format!("exit {} shutdown={}", self.0, reason.is_shutdown()));
    }

    fn destroy(&mut self, ctx: &mut Context<'_, Actor, Locomotion>) {
        ctx.owner().log(format!("destroy {}", self.0));
    }
}

fn locomotion(actor: &Actor) -> Machine<Actor, Locomotion> {
    Machine::builder()
        .name("legs")
        .owner(actor.clone())
        .state(Recorder(Locomotion::Idle))
        .state(Recorder(Locomotion::Walking))
        .state(Recorder(Locomotion::Running))
        .build()
        .unwrap()
}

#[test]
fn idle_walk_dispose_scenario() {
    let actor = Actor::default();
    let mut machine = locomotion(&actor);
    assert_eq!(
        actor.drain(),
        vec!["init Idle", "init Walking", "init Running"]
    );

    assert!(machine.start(Locomotion::Idle));
    assert_eq!(machine.current_state_id(), Some(Locomotion::Idle));
    assert_eq!(machine.elapsed(), Duration::ZERO);

    machine.update(Duration::from_millis(200));
    machine.update(Duration::from_millis(200));
    assert_eq!(machine.elapsed(), Duration::from_millis(400));

    assert!(machine.change_state(Locomotion::Walking));
    assert_eq!(machine.elapsed(), Duration::ZERO);

    machine.dispose();
    assert_eq!(
        actor.drain(),
        vec![
            "enter Idle",
            "exit Idle shutdown=false",
            "enter Walking",
            "exit Walking shutdown=true",
            "destroy Idle",
            "destroy Walking",
            "destroy Running",
        ]
    );
    assert_eq!(machine.state_count(), 0);
    assert!(!machine.is_running());
    assert!(machine.is_destroyed());
}

#[test]
fn disposed_machine_ignores_everything() {
    let actor = Actor::default();
    let mut machine = locomotion(&actor);
    machine.start(Locomotion::Running);
    machine.dispose();
    actor.drain();

    assert!(!machine.start(Locomotion::Idle));
    assert!(!machine.change_state(Locomotion::Walking));
    assert!(!machine.update(Duration::from_secs(1)));
    assert_eq!(
        machine.try_start(Locomotion::Idle),
        Err(Rejection::Disposed)
    );
    machine.dispose();

    assert!(actor.drain().is_empty());
    assert!(machine.owner().is_none());
    assert!(machine.current_state().is_none());
    assert_eq!(machine.elapsed(), Duration::ZERO);
}

#[test]
fn full_name_combines_owner_type_and_name() {
    let actor = Actor::default();
    let machine = locomotion(&actor);

    assert_eq!(machine.full_name(), format!("{}.legs", machine.owner_type()));
    assert!(machine.owner_type().ends_with("Actor"));
}

/// Walks until enough time has passed, then asks to run.
struct Pacer {
    after: Duration,
}

impl State<Actor, Locomotion> for Pacer {
    fn id(&self) -> Locomotion {
        Locomotion::Walking
    }

    fn update(&mut self, ctx: &mut Context<'_, Actor, Locomotion>) {
        if ctx.elapsed() >= self.after {
            ctx.change_state(Locomotion::Running);
        }
    }
}

/// Immediately falls back to idle on entry.
struct Stumble;

impl State<Actor, Locomotion> for Stumble {
    fn id(&self) -> Locomotion {
        Locomotion::Running
    }

    fn enter(&mut self, ctx: &mut Context<'_, Actor, Locomotion>) {
        ctx.owner().log("stumbled".to_string());
        ctx.change_state(Locomotion::Idle);
    }
}

#[test]
fn states_drive_their_own_transitions() {
    let actor = Actor::default();
    let mut machine = Machine::builder()
        .name("legs")
        .owner(actor.clone())
        .state(Recorder(Locomotion::Idle))
        .state(Pacer {
            after: Duration::from_millis(300),
        })
        .state(Stumble)
        .build()
        .unwrap();
    machine.start(Locomotion::Walking);
    actor.drain();

    machine.update(Duration::from_millis(200));
    assert_eq!(machine.current_state_id(), Some(Locomotion::Walking));

    machine.update(Duration::from_millis(200));
    assert_eq!(machine.current_state_id(), Some(Locomotion::Idle));
    assert_eq!(actor.drain(), vec!["stumbled", "enter Idle"]);
    assert_eq!(machine.elapsed(), Duration::ZERO);
}

#[test]
fn machine_releases_owner_on_dispose() {
    let actor = Actor::default();
    let mut machine = locomotion(&actor);
    assert_eq!(Rc::strong_count(&actor.journal), 2);

    machine.dispose();

    assert_eq!(Rc::strong_count(&actor.journal), 1);
}
