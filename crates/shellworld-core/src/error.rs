//! Error types for world operations and action handlers.

use shellworld_grid::GridError;
use shellworld_types::{BankId, Coordinate, EntityKey};

/// Errors surfaced by placement and removal on a [`World`](crate::World).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The grid rejected a coordinate.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// Another entity already occupies the target cell.
    #[error("location {coordinate} is already occupied")]
    OccupiedLocation {
        /// The contested cell.
        coordinate: Coordinate,
    },

    /// No entity with this key exists in the world.
    #[error("unknown entity: {key}")]
    UnknownEntity {
        /// The missing key.
        key: EntityKey,
    },

    /// The entity is not on the grid.
    #[error("entity {key} is not placed")]
    NotPlaced {
        /// The detached entity.
        key: EntityKey,
    },

    /// The entity is already on the grid somewhere else.
    #[error("entity {key} is already placed at {coordinate}")]
    AlreadyPlaced {
        /// The placed entity.
        key: EntityKey,
        /// Where it currently is.
        coordinate: Coordinate,
    },

    /// No empty cell could be found for a random placement.
    #[error("no empty cell available")]
    NoVacancy,
}

/// Errors returned by action handlers.
///
/// The interpreter never propagates these: every error turns the action
/// into a no-op. The first three variants are expected skips and are
/// logged at debug level; the rest indicate a broken world and are logged
/// as warnings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The acting shell lacks a tag this action requires.
    #[error("missing tag: {key}")]
    MissingTag {
        /// The tag key that was expected.
        key: &'static str,
    },

    /// The shell is bound to a bank the world does not know.
    #[error("bank {bank} is not configured")]
    UnconfiguredEconomy {
        /// The unknown bank.
        bank: BankId,
    },

    /// Nothing suitable occupies the addressed cell.
    #[error("no target at {coordinate}")]
    NoTarget {
        /// The addressed cell.
        coordinate: Coordinate,
    },

    /// A grid lookup failed.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// A world mutation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

impl ActionError {
    /// Whether this error is an expected, quiet skip.
    pub const fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::MissingTag { .. } | Self::UnconfiguredEconomy { .. } | Self::NoTarget { .. }
        )
    }
}
