//! The action interpreter: a per-shell table from action kind to effect.
//!
//! `act` walks the shell's pending actions in order. Each action is looked
//! up by [`ActionKind`]; kinds without a registered handler are skipped.
//! After running a terminal action (move, collect, consume) the rest of the
//! sequence is discarded. Pending actions are cleared no matter how the
//! loop ends, so a second `act` without a new perception does nothing.

use std::collections::BTreeMap;

use shellworld_types::{Action, ActionKind, EntityKey};
use tracing::{debug, warn};

use crate::entity::Entity;
use crate::error::ActionError;
use crate::handlers;
use crate::world::World;

/// Applies one action on behalf of the shell at `EntityKey`.
pub type ActionHandler = fn(&mut World, EntityKey, &Action) -> Result<(), ActionError>;

/// Handlers indexed by the action kind they implement.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    handlers: BTreeMap<ActionKind, ActionHandler>,
}

impl ActionRegistry {
    /// A registry with no handlers: every action is skipped.
    pub const fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Movement, turning, recoloring, and messaging.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(ActionKind::Move, handlers::move_forward);
        registry.register(ActionKind::Turn, handlers::turn);
        registry.register(ActionKind::Color, handlers::recolor);
        registry.register(ActionKind::Message, handlers::send_message);
        registry
    }

    /// The standard set plus coin collection and consumption.
    pub fn cash_grab() -> Self {
        let mut registry = Self::standard();
        registry.register(ActionKind::CollectCoin, handlers::collect_coin);
        registry.register(ActionKind::Consume, handlers::consume);
        registry
    }

    /// Install `handler` for `kind`, returning the handler it replaces.
    pub fn register(&mut self, kind: ActionKind, handler: ActionHandler) -> Option<ActionHandler> {
        self.handlers.insert(kind, handler)
    }

    /// Remove the handler for `kind`.
    pub fn unregister(&mut self, kind: ActionKind) -> Option<ActionHandler> {
        self.handlers.remove(&kind)
    }

    /// The handler for `kind`, if registered.
    pub fn get(&self, kind: ActionKind) -> Option<ActionHandler> {
        self.handlers.get(&kind).copied()
    }

    /// Whether `kind` has a handler.
    pub fn handles(&self, kind: ActionKind) -> bool {
        self.handlers.contains_key(&kind)
    }
}

/// Run the pending actions of the shell at `key`.
///
/// Returns the number of actions whose handler ran (successfully or not).
pub(crate) fn run_pending(world: &mut World, key: EntityKey) -> usize {
    let Some(shell) = world.entity_mut(key).and_then(Entity::as_shell_mut) else {
        return 0;
    };
    let pending = shell.take_pending();
    let mut executed: usize = 0;

    for action in &pending {
        let kind = action.kind();
        let handler = world
            .entity(key)
            .and_then(Entity::as_shell)
            .map(|s| s.registry().get(kind));

        match handler {
            // The shell was destroyed by one of its own earlier actions.
            None => {
                debug!(%key, "shell left the world mid-sequence");
                break;
            }
            Some(None) => {
                debug!(%key, ?kind, "no handler registered, skipping action");
            }
            Some(Some(handler)) => {
                executed = executed.saturating_add(1);
                match handler(world, key, action) {
                    Ok(()) => {}
                    Err(err) if err.is_skip() => {
                        debug!(%key, ?kind, error = %err, "action skipped");
                    }
                    Err(err) => {
                        warn!(%key, ?kind, error = %err, "action failed, treated as no-op");
                    }
                }
            }
        }

        if action.is_terminal() {
            break;
        }
    }

    // A message to oneself refills pending mid-loop; discard it.
    if let Some(shell) = world.entity_mut(key).and_then(Entity::as_shell_mut) {
        shell.clear_pending();
    }
    executed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_excludes_economy() {
        let registry = ActionRegistry::standard();
        assert!(registry.handles(ActionKind::Move));
        assert!(registry.handles(ActionKind::Message));
        assert!(!registry.handles(ActionKind::CollectCoin));
        assert!(!registry.handles(ActionKind::Consume));
    }

    #[test]
    fn cash_grab_registry_adds_economy() {
        let registry = ActionRegistry::cash_grab();
        assert!(registry.handles(ActionKind::CollectCoin));
        assert!(registry.handles(ActionKind::Consume));
        assert!(registry.handles(ActionKind::Turn));
    }

    #[test]
    fn register_replaces_and_unregister_removes() {
        let mut registry = ActionRegistry::empty();
        assert!(registry.register(ActionKind::Turn, handlers::turn).is_none());
        assert!(registry.register(ActionKind::Turn, handlers::turn).is_some());
        assert!(registry.unregister(ActionKind::Turn).is_some());
        assert!(registry.get(ActionKind::Turn).is_none());
    }
}
