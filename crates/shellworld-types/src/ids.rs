//! Type-safe identifier wrappers.
//!
//! Every addressable thing in the simulation has a strongly-typed ID so
//! that a shell id can never be handed to the bank as an account id by
//! accident. Shell, account, and bank ids are small integers chosen by
//! whoever builds the world; entity keys are allocated by the world's
//! arena; grid ids are random UUIDs so two grids never compare equal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around an integer with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl $name {
            /// Wrap a raw value.
            pub const fn new(raw: $inner) -> Self {
                Self(raw)
            }

            /// Return the raw inner value.
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(raw: $inner) -> Self {
                Self(raw)
            }
        }
    };
}

define_id! {
    /// Identity of a shell, used for message-by-id delivery.
    ShellId(u32)
}

define_id! {
    /// An account inside a [`Bank`](BankId).
    AccountId(u32)
}

define_id! {
    /// Identifies one bank among those registered with a world.
    BankId(u32)
}

define_id! {
    /// Arena key of an entity owned by a world.
    ///
    /// Keys are never reused within one world, so a stale key simply stops
    /// resolving once the entity has been destroyed.
    EntityKey(u64)
}

/// Identity of a grid instance.
///
/// An entity's placement records the grid it was put into; the scheduler
/// compares this against its own grid to detect mid-tick removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridId(pub Uuid);

impl GridId {
    /// Create a fresh, random grid identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for GridId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for GridId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_ids_are_unique() {
        assert_ne!(GridId::new(), GridId::new());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = ShellId::new(7);
        let json = serde_json::to_string(&original).ok();
        assert_eq!(json.as_deref(), Some("7"));
        let restored: Result<ShellId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn id_display_matches_inner() {
        assert_eq!(AccountId::new(42).to_string(), "42");
        assert_eq!(BankId::from(3).into_inner(), 3);
    }
}
