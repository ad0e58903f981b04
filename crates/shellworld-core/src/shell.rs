//! The policy-driven agent entity.

use shellworld_types::{Action, ShellId};

use crate::config::ShellConfig;
use crate::interpreter::ActionRegistry;
use crate::policy::Policy;

/// An agent: an identity, a policy, an action registry, and the actions
/// produced by its last perception.
///
/// Position, facing, color, and tags live on the owning
/// [`Entity`](crate::Entity).
#[derive(Debug)]
pub struct Shell {
    id: ShellId,
    policy: Box<dyn Policy>,
    registry: ActionRegistry,
    config: ShellConfig,
    pending: Vec<Action>,
}

impl Shell {
    /// Create a shell with the standard action registry and default limits.
    pub fn new(id: ShellId, policy: Box<dyn Policy>) -> Self {
        Self {
            id,
            policy,
            registry: ActionRegistry::standard(),
            config: ShellConfig::default(),
            pending: Vec::new(),
        }
    }

    /// Replace the action registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the per-shell limits.
    #[must_use]
    pub fn with_config(mut self, config: ShellConfig) -> Self {
        self.config = config;
        self
    }

    /// This shell's identity.
    pub const fn id(&self) -> ShellId {
        self.id
    }

    /// The type name other shells perceive.
    pub fn species(&self) -> &str {
        self.policy.species()
    }

    /// The shell's action registry.
    pub const fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// The shell's limits.
    pub const fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Actions awaiting the next `act`.
    pub fn pending(&self) -> &[Action] {
        &self.pending
    }

    pub(crate) fn policy_mut(&mut self) -> &mut dyn Policy {
        self.policy.as_mut()
    }

    pub(crate) fn set_pending(&mut self, actions: Vec<Action>) {
        self.pending = actions;
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub(crate) fn take_pending(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }
}
