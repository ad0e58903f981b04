//! The closed set of actions a shell's policy may emit in one tick.
//!
//! A policy returns an ordered `Vec<Action>`. The interpreter walks it in
//! order and stops after the first action whose kind is terminal, so a
//! policy can queue cosmetic changes (turn, recolor, message) ahead of the
//! one thing it actually does with its body this tick (move, collect,
//! consume).

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::ids::ShellId;

/// A message body.
///
/// Messages are value types: the payload is cloned when it is sent and
/// again for each recipient of a shout, so no two shells ever share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Free text.
    Text(String),
    /// Structured data for policies that speak a richer protocol.
    Value(serde_json::Value),
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Who a [`Action::Message`] is addressed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageScope {
    /// Every shell within `radius` cells (straight-line distance) of the
    /// sender. The radius is clamped to the sender's message range.
    Shout {
        /// Requested shout radius.
        radius: f64,
    },
    /// Whatever shell occupies the cell at an absolute compass bearing and
    /// distance from the sender, as reported in perception.
    Bearing {
        /// Absolute compass bearing in degrees.
        direction: f64,
        /// Distance in cells.
        distance: f64,
    },
    /// A shell addressed by identity.
    Recipient(ShellId),
}

/// One command emitted by a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Step forward `distance` cells along the current facing.
    Move {
        /// Requested number of cells, clamped to the shell's maximum.
        distance: u32,
    },
    /// Rotate by `units` half right angles (45 degrees each, positive is
    /// clockwise).
    Turn {
        /// Signed number of 45 degree units.
        units: i32,
    },
    /// Change the shell's color.
    Color {
        /// The new color.
        color: Color,
    },
    /// Send a message.
    Message {
        /// Addressing mode.
        scope: MessageScope,
        /// Message body.
        payload: Payload,
    },
    /// Mine coins from the cell at a polar offset relative to facing.
    CollectCoin {
        /// Degrees relative to the sender's facing.
        direction: f64,
        /// Distance in cells.
        distance: f64,
    },
    /// Destroy whatever occupies the cell at a polar offset relative to
    /// facing.
    Consume {
        /// Degrees relative to the sender's facing.
        direction: f64,
        /// Distance in cells.
        distance: f64,
    },
}

/// The discriminant of an [`Action`], used as the interpreter's registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// [`Action::Move`].
    Move,
    /// [`Action::Turn`].
    Turn,
    /// [`Action::Color`].
    Color,
    /// [`Action::Message`].
    Message,
    /// [`Action::CollectCoin`].
    CollectCoin,
    /// [`Action::Consume`].
    Consume,
}

impl ActionKind {
    /// Whether an action of this kind ends the shell's turn.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Move | Self::CollectCoin | Self::Consume)
    }
}

impl Action {
    /// The kind of this action.
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Move { .. } => ActionKind::Move,
            Self::Turn { .. } => ActionKind::Turn,
            Self::Color { .. } => ActionKind::Color,
            Self::Message { .. } => ActionKind::Message,
            Self::CollectCoin { .. } => ActionKind::CollectCoin,
            Self::Consume { .. } => ActionKind::Consume,
        }
    }

    /// Whether the interpreter stops after this action.
    pub const fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }
}
