//! Open key/value attributes that parameterize shell behavior.
//!
//! Tags let a world grant roles (pushable, minable, predator) to
//! individual shells without a new type per role. A missing key means
//! "unset"; readers always supply the default they want.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, BankId};

/// Well-known tag keys understood by the built-in action handlers.
pub mod keys {
    /// `Flag(true)` lets the shell be shoved by a colliding mover.
    pub const PUSHABLE: &str = "shellworld.pushable";
    /// `Account { .. }` binds the shell to a bank account for coin mining.
    pub const MINABLE: &str = "cashgrab.minable";
    /// `Flag(true)` allows the shell to consume other actors.
    pub const PREDATOR: &str = "cashgrab.predator";
}

/// A tag value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TagValue {
    /// A boolean switch.
    Flag(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// Free text.
    Text(String),
    /// A binding to an account held by a bank.
    Account {
        /// The bank holding the account.
        bank: BankId,
        /// The account inside that bank.
        account: AccountId,
    },
}

/// Per-entity tag map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagStore {
    tags: BTreeMap<String, TagValue>,
}

impl TagStore {
    /// Create an empty tag store.
    pub const fn new() -> Self {
        Self {
            tags: BTreeMap::new(),
        }
    }

    /// Set `key`, returning the previous value if any.
    pub fn set(&mut self, key: impl Into<String>, value: TagValue) -> Option<TagValue> {
        self.tags.insert(key.into(), value)
    }

    /// Look up `key`.
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(key)
    }

    /// Look up `key`, falling back to `default` when it is unset.
    pub fn get_or_default(&self, key: &str, default: TagValue) -> TagValue {
        self.tags.get(key).cloned().unwrap_or(default)
    }

    /// Remove `key`, returning its value if it was set.
    pub fn remove(&mut self, key: &str) -> Option<TagValue> {
        self.tags.remove(key)
    }

    /// Read a boolean tag; unset or non-boolean values read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.get_or_default(key, TagValue::Flag(false)),
            TagValue::Flag(true)
        )
    }

    /// Read an account binding, if `key` holds one.
    pub fn account(&self, key: &str) -> Option<(BankId, AccountId)> {
        match self.tags.get(key) {
            Some(TagValue::Account { bank, account }) => Some((*bank, *account)),
            _ => None,
        }
    }

    /// Iterate over all tags in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, TagValue> {
        self.tags.iter()
    }

    /// Number of tags set.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no tags are set.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<'a> IntoIterator for &'a TagStore {
    type Item = (&'a String, &'a TagValue);
    type IntoIter = btree_map::Iter<'a, String, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_fall_back_to_default() {
        let tags = TagStore::new();
        assert!(tags.get(keys::PUSHABLE).is_none());
        assert_eq!(
            tags.get_or_default(keys::PUSHABLE, TagValue::Int(3)),
            TagValue::Int(3)
        );
        assert!(!tags.flag(keys::PUSHABLE));
    }

    #[test]
    fn set_replaces_and_reports_previous() {
        let mut tags = TagStore::new();
        assert!(tags.set(keys::PREDATOR, TagValue::Flag(false)).is_none());
        let previous = tags.set(keys::PREDATOR, TagValue::Flag(true));
        assert_eq!(previous, Some(TagValue::Flag(false)));
        assert!(tags.flag(keys::PREDATOR));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn account_binding_reads_back() {
        let mut tags = TagStore::new();
        tags.set(
            keys::MINABLE,
            TagValue::Account {
                bank: BankId::new(0),
                account: AccountId::new(9),
            },
        );
        assert_eq!(
            tags.account(keys::MINABLE),
            Some((BankId::new(0), AccountId::new(9)))
        );
        tags.set(keys::MINABLE, TagValue::Text("nope".into()));
        assert!(tags.account(keys::MINABLE).is_none());
    }

    #[test]
    fn non_boolean_flag_reads_false() {
        let mut tags = TagStore::new();
        tags.set(keys::PUSHABLE, TagValue::Int(1));
        assert!(!tags.flag(keys::PUSHABLE));
    }
}
