//! Core simulation engine for Shellworld.
//!
//! A [`World`] owns one grid, an arena of entities, the banks, and a
//! [`Watchman`] that resolves deferred effects. Each call to
//! [`World::step`] runs one tick:
//!
//! 1. **Snapshot** -- record every occupant before anyone acts.
//! 2. **Perceive** -- each shell still on the grid builds a view of its
//!    neighborhood and asks its [`Policy`] for actions.
//! 3. **Act** -- the [`ActionRegistry`] runs the actions until the first
//!    terminal one. Collisions and messages are filed with the watchman,
//!    which dispatches them immediately (and recursively for push chains).
//!
//! Plain actors (rocks, flowers, bugs, coins) act without a policy.
//!
//! # Modules
//!
//! - [`config`] -- YAML-backed [`SimulationConfig`]
//! - [`error`] -- [`WorldError`] and [`ActionError`]
//! - [`entity`] -- [`Entity`], [`EntityKind`], placement
//! - [`shell`] -- [`Shell`], the policy-driven agent
//! - [`policy`] -- The [`Policy`] trait and simple implementations
//! - [`perception`] -- Neighborhood snapshots handed to policies
//! - [`interpreter`] -- [`ActionRegistry`] and the act loop
//! - [`handlers`] -- Effects of each action kind
//! - [`watchman`] -- Report dispatch: push cascades and message delivery
//! - [`actors`] -- Behavior of plain actors
//! - [`world`] -- [`World`], the tick scheduler, and snapshots

pub mod actors;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod interpreter;
pub mod perception;
pub mod policy;
pub mod shell;
pub mod watchman;
pub mod world;

pub use config::{ConfigError, ScenarioConfig, ShellConfig, SimulationConfig, WorldConfig};
pub use entity::{Entity, EntityKind, Placement};
pub use error::{ActionError, WorldError};
pub use interpreter::{ActionHandler, ActionRegistry};
pub use policy::{Policy, PolicyContext, ScriptedPolicy, StubPolicy};
pub use shell::Shell;
pub use watchman::{ReportHandler, Watchman};
pub use world::{EntitySnapshot, TickSummary, World, WorldSnapshot};
