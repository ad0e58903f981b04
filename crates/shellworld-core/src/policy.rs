//! The decision function that drives a shell.
//!
//! When a shell is woken (by the scheduler or by a delivered message) the
//! world builds an [`ActorInfo`] for the shell itself and one per occupied
//! cell in its neighborhood, then hands both to the shell's [`Policy`].
//! The returned actions replace the shell's pending actions and are run by
//! the interpreter on its next `act`.
//!
//! Policies are trusted in-process code. They must not block, and they get
//! randomness only from the [`PolicyContext`] so a seeded world replays
//! identically.

use rand::rngs::StdRng;
use shellworld_types::{Action, ActorEvent, ActorInfo};

/// What a policy may use besides its perception.
#[derive(Debug)]
pub struct PolicyContext<'a> {
    /// The tick being run (0 before the first step).
    pub tick: u64,
    /// The world's random number generator.
    pub rng: &'a mut StdRng,
}

/// A shell's brain.
pub trait Policy: std::fmt::Debug {
    /// The type name this shell reports in other shells' perception.
    fn species(&self) -> &str {
        "Shell"
    }

    /// Decide what to do in response to `event`.
    ///
    /// `me` describes the shell itself: its id, color, facing, and zero
    /// distance. `neighborhood` lists every other occupant within the
    /// shell's perception radius, in row-major order.
    fn respond(
        &mut self,
        event: &ActorEvent,
        me: &ActorInfo,
        neighborhood: &[ActorInfo],
        ctx: &mut PolicyContext<'_>,
    ) -> Vec<Action>;
}

/// A policy that never does anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPolicy;

impl StubPolicy {
    /// Create a new stub policy.
    pub const fn new() -> Self {
        Self
    }
}

impl Policy for StubPolicy {
    fn respond(
        &mut self,
        _event: &ActorEvent,
        _me: &ActorInfo,
        _neighborhood: &[ActorInfo],
        _ctx: &mut PolicyContext<'_>,
    ) -> Vec<Action> {
        Vec::new()
    }
}

/// A policy that replays fixed action lists.
///
/// Every step event yields `on_step`; every delivered message yields
/// `on_message`. Useful for scripted scenarios and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    species: Option<String>,
    on_step: Vec<Action>,
    on_message: Vec<Action>,
}

impl ScriptedPolicy {
    /// Replay `on_step` every tick and ignore messages.
    pub const fn new(on_step: Vec<Action>) -> Self {
        Self {
            species: None,
            on_step,
            on_message: Vec::new(),
        }
    }

    /// Reply to every delivered message with `actions`.
    #[must_use]
    pub fn replying(mut self, actions: Vec<Action>) -> Self {
        self.on_message = actions;
        self
    }

    /// Report `species` as the type name.
    #[must_use]
    pub fn named(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }
}

impl Policy for ScriptedPolicy {
    fn species(&self) -> &str {
        self.species.as_deref().unwrap_or("Shell")
    }

    fn respond(
        &mut self,
        event: &ActorEvent,
        _me: &ActorInfo,
        _neighborhood: &[ActorInfo],
        _ctx: &mut PolicyContext<'_>,
    ) -> Vec<Action> {
        match event {
            ActorEvent::Step => self.on_step.clone(),
            ActorEvent::Message { .. } => self.on_message.clone(),
        }
    }
}
