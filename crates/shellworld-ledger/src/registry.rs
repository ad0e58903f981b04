//! The set of banks known to one world.

use std::collections::btree_map::{self, BTreeMap, Entry};

use shellworld_types::BankId;

use crate::LedgerError;
use crate::bank::Bank;

/// Banks indexed by id.
#[derive(Debug, Clone, Default)]
pub struct BankRegistry {
    banks: BTreeMap<BankId, Bank>,
}

impl BankRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            banks: BTreeMap::new(),
        }
    }

    /// Register a new, empty bank.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateBank`] if `id` is taken.
    pub fn open(&mut self, id: BankId) -> Result<&mut Bank, LedgerError> {
        match self.banks.entry(id) {
            Entry::Occupied(_) => Err(LedgerError::DuplicateBank(id)),
            Entry::Vacant(slot) => Ok(slot.insert(Bank::new(id))),
        }
    }

    /// Look up a bank.
    pub fn get(&self, id: BankId) -> Option<&Bank> {
        self.banks.get(&id)
    }

    /// Look up a bank mutably.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownBank`] if `id` is not registered.
    pub fn get_mut(&mut self, id: BankId) -> Result<&mut Bank, LedgerError> {
        self.banks.get_mut(&id).ok_or(LedgerError::UnknownBank(id))
    }

    /// Iterate over all banks.
    pub fn iter(&self) -> btree_map::Iter<'_, BankId, Bank> {
        self.banks.iter()
    }
}

impl<'a> IntoIterator for &'a BankRegistry {
    type Item = (&'a BankId, &'a Bank);
    type IntoIter = btree_map::Iter<'a, BankId, Bank>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
