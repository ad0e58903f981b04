//! Error types for the `shellworld-grid` crate.

use shellworld_types::Coordinate;

/// Errors that can occur during grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The coordinate lies outside a bounded grid.
    #[error("coordinate {coordinate} is not valid on this grid")]
    InvalidCoordinate {
        /// The rejected coordinate.
        coordinate: Coordinate,
    },

    /// A bounded grid was requested with a zero extent.
    #[error("grid extent must be positive (rows: {rows}, cols: {cols})")]
    EmptyExtent {
        /// Requested rows.
        rows: u32,
        /// Requested columns.
        cols: u32,
    },
}
