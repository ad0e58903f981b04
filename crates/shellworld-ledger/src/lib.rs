//! Banks and the transfer journal for the Shellworld simulation.
//!
//! A [`Bank`] maps account ids to signed integer balances. Unknown
//! accounts read as zero. Every deposit and transfer is appended to the
//! bank's journal, which makes the conservation law checkable: the sum of
//! all balances always equals the sum of all deposits.
//!
//! # Overdraft
//!
//! [`Bank::transfer`] applies the debit and the credit unconditionally.
//! Callers (the coin-collection handler) check the source balance first,
//! but the ledger itself permits negative balances.
//!
//! # Modules
//!
//! - [`bank`] -- [`Bank`] and [`LedgerEntry`].
//! - [`registry`] -- [`BankRegistry`], the set of banks a world knows.

pub mod bank;
pub mod registry;

pub use bank::{Bank, EntryKind, LedgerEntry};
pub use registry::BankRegistry;

use shellworld_types::BankId;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// No bank with this id is registered.
    #[error("unknown bank: {0}")]
    UnknownBank(BankId),

    /// A bank with this id is already registered.
    #[error("duplicate bank: {0}")]
    DuplicateBank(BankId),

    /// The sum of balances no longer matches the sum of deposits.
    #[error("conservation violated in bank {bank}: balances {balances}, deposits {deposits}")]
    ConservationViolated {
        /// The bank that failed the check.
        bank: BankId,
        /// Sum of all account balances.
        balances: i64,
        /// Sum of all deposits ever made.
        deposits: i64,
    },
}
