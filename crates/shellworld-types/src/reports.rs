//! Deferred-effect reports filed with a world's watchman.
//!
//! Action handlers do not resolve cross-entity consequences themselves.
//! They file a [`ReportEvent`] and the watchman dispatches it to the
//! handler registered for its [`ReportKind`].

use serde::{Deserialize, Serialize};

use crate::actions::Payload;
use crate::ids::{EntityKey, ShellId};
use crate::location::Direction;

/// A deferred cross-entity effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportEvent {
    /// An entity tried to move into an occupied cell.
    Collision {
        /// The entity that was moving.
        collider: EntityKey,
        /// The occupant of the cell it tried to enter.
        collided_with: EntityKey,
        /// Heading of the attempted move.
        direction: Direction,
    },
    /// A message awaiting delivery.
    Message {
        /// Sending shell.
        sender: ShellId,
        /// Addressed shell.
        recipient: ShellId,
        /// Copied payload.
        payload: Payload,
    },
}

/// The discriminant of a [`ReportEvent`], used as the watchman's registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    /// [`ReportEvent::Collision`].
    Collision,
    /// [`ReportEvent::Message`].
    Message,
}

impl ReportEvent {
    /// The kind of this report.
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::Collision { .. } => ReportKind::Collision,
            Self::Message { .. } => ReportKind::Message,
        }
    }
}
