//! A single bank: balances plus an append-only journal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shellworld_types::{AccountId, BankId};
use tracing::debug;

use crate::LedgerError;

/// What a journal entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Money entering the bank from outside (seeding a coin).
    Deposit,
    /// Money moving between two accounts.
    Transfer,
}

/// One journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Deposit or transfer.
    pub kind: EntryKind,
    /// Debited account; `None` for deposits.
    pub from: Option<AccountId>,
    /// Credited account.
    pub to: AccountId,
    /// Amount moved.
    pub amount: i64,
}

/// A named-account ledger.
#[derive(Debug, Clone)]
pub struct Bank {
    /// This bank's id.
    id: BankId,
    /// Current balances; absent accounts hold zero.
    balances: BTreeMap<AccountId, i64>,
    /// Every deposit and transfer, in order.
    journal: Vec<LedgerEntry>,
}

impl Bank {
    /// Create an empty bank.
    pub const fn new(id: BankId) -> Self {
        Self {
            id,
            balances: BTreeMap::new(),
            journal: Vec::new(),
        }
    }

    /// This bank's id.
    pub const fn id(&self) -> BankId {
        self.id
    }

    /// Balance of `account`, zero if it has never been touched.
    pub fn balance(&self, account: AccountId) -> i64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Credit `account` with new money.
    pub fn deposit(&mut self, account: AccountId, amount: i64) {
        let balance = self.balances.entry(account).or_insert(0);
        *balance = balance.saturating_add(amount);
        self.journal.push(LedgerEntry {
            kind: EntryKind::Deposit,
            from: None,
            to: account,
            amount,
        });
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// The debit is applied even if it drives `from` negative.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: i64) {
        let source = self.balances.entry(from).or_insert(0);
        *source = source.saturating_sub(amount);
        let dest = self.balances.entry(to).or_insert(0);
        *dest = dest.saturating_add(amount);
        debug!(bank = %self.id, %from, %to, amount, "transfer");
        self.journal.push(LedgerEntry {
            kind: EntryKind::Transfer,
            from: Some(from),
            to,
            amount,
        });
    }

    /// Every entry recorded so far.
    pub fn journal(&self) -> &[LedgerEntry] {
        &self.journal
    }

    /// Iterate over all accounts with a recorded balance.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &i64)> {
        self.balances.iter()
    }

    /// Check that balances still sum to total deposits.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ConservationViolated`] if they differ.
    pub fn verify_conservation(&self) -> Result<(), LedgerError> {
        let balances = self
            .balances
            .values()
            .fold(0_i64, |acc, b| acc.saturating_add(*b));
        let deposits = self
            .journal
            .iter()
            .filter(|e| e.kind == EntryKind::Deposit)
            .fold(0_i64, |acc, e| acc.saturating_add(e.amount));
        if balances == deposits {
            Ok(())
        } else {
            Err(LedgerError::ConservationViolated {
                bank: self.id,
                balances,
                deposits,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(n: u32) -> AccountId {
        AccountId::new(n)
    }

    #[test]
    fn unknown_accounts_read_zero() {
        let bank = Bank::new(BankId::new(0));
        assert_eq!(bank.balance(acct(99)), 0);
    }

    #[test]
    fn transfer_moves_money_and_journals() {
        let mut bank = Bank::new(BankId::new(0));
        bank.deposit(acct(2), 10);
        bank.transfer(acct(2), acct(1), 5);
        assert_eq!(bank.balance(acct(1)), 5);
        assert_eq!(bank.balance(acct(2)), 5);
        assert_eq!(bank.journal().len(), 2);
        assert_eq!(bank.journal().last().map(|e| e.kind), Some(EntryKind::Transfer));
        assert!(bank.verify_conservation().is_ok());
    }

    #[test]
    fn overdraft_is_not_rejected() {
        // The ledger does not guard against overdraft; callers must.
        let mut bank = Bank::new(BankId::new(0));
        bank.deposit(acct(2), 3);
        bank.transfer(acct(2), acct(1), 8);
        assert_eq!(bank.balance(acct(2)), -5);
        assert_eq!(bank.balance(acct(1)), 8);
        assert!(bank.verify_conservation().is_ok());
    }
}
