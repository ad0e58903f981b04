//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the run loop so
//! `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: shellworld_core::ConfigError,
    },

    /// World construction or placement failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: shellworld_core::WorldError,
    },

    /// Opening a bank failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: shellworld_ledger::LedgerError,
    },

    /// Rendering the final snapshot failed.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
