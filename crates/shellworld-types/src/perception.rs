//! What a policy is shown when it is asked to decide.
//!
//! A policy never sees the grid. It receives the [`ActorEvent`] that woke
//! it, an [`ActorInfo`] describing itself, and one [`ActorInfo`] per
//! occupied cell in its neighborhood.

use serde::{Deserialize, Serialize};

use crate::actions::Payload;
use crate::color::Color;
use crate::ids::ShellId;

/// One perceived actor.
///
/// Every field is optional because not every context fills every field:
/// the "self" record has no type name, and plain actors have no shell id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorInfo {
    /// Shell identity, when the actor is a shell.
    pub id: Option<ShellId>,
    /// Concrete type name (`"Rock"`, `"Coin"`, or a shell's species).
    pub type_name: Option<String>,
    /// Straight-line distance from the observer, in cells.
    pub distance: Option<f64>,
    /// Absolute compass bearing from the observer, in degrees
    /// (`[-180, 180)`, `0` is North, `90` is East). For the "self" record
    /// this is the observer's own facing.
    pub direction: Option<f64>,
    /// The actor's color.
    pub color: Option<Color>,
}

/// The event that caused a policy to be consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorEvent {
    /// The scheduler is about to let the shell act this tick.
    Step,
    /// A message was delivered by the watchman.
    Message {
        /// Shell that sent the message.
        sender: ShellId,
        /// The sender's payload, copied for this recipient.
        payload: Payload,
    },
}
