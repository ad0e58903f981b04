//! Scenario seeding: scatter the configured population over the grid.
//!
//! All shells share one bank. A minable shell's account id equals its
//! shell id; coins use accounts from [`COIN_ACCOUNT_BASE`] upward so the
//! two ranges never meet.

use shellworld_brains::{CoinSeeker, HunterCritter, RandomWalker};
use shellworld_core::{ActionRegistry, Entity, Policy, Shell, ShellConfig, SimulationConfig, World};
use shellworld_types::{AccountId, BankId, ShellId, TagValue, tags::keys};
use tracing::info;

use crate::error::EngineError;

/// The bank every spawned coin and miner uses.
pub const SCENARIO_BANK: BankId = BankId::new(0);

/// First account id handed to coins.
pub const COIN_ACCOUNT_BASE: u32 = 10_000;

/// How many entities of each kind were placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Population {
    /// Shells of every species.
    pub shells: u32,
    /// Coins.
    pub coins: u32,
    /// Rocks, flowers, and bugs.
    pub props: u32,
}

/// Hands out shell ids in order, starting at 1.
struct IdSource(u32);

impl IdSource {
    fn next(&mut self) -> ShellId {
        self.0 = self.0.saturating_add(1);
        ShellId::new(self.0)
    }
}

fn spawn_shell(
    id: ShellId,
    policy: Box<dyn Policy>,
    registry: ActionRegistry,
    config: &ShellConfig,
) -> Entity {
    Entity::shell(
        Shell::new(id, policy)
            .with_registry(registry)
            .with_config(config.clone()),
    )
}

/// Place the configured scenario into `world`.
///
/// # Errors
///
/// Returns [`EngineError::World`] if the grid fills up, or
/// [`EngineError::Ledger`] if the scenario bank already exists.
pub fn populate(world: &mut World, config: &SimulationConfig) -> Result<Population, EngineError> {
    let scenario = &config.scenario;
    let shell_config = &config.shell;
    let mut ids = IdSource(0);
    let mut population = Population::default();

    world.banks_mut().open(SCENARIO_BANK)?;

    for _ in 0..scenario.walkers {
        let entity = spawn_shell(
            ids.next(),
            Box::new(RandomWalker::new()),
            ActionRegistry::standard(),
            shell_config,
        )
        .tagged(keys::PUSHABLE, TagValue::Flag(true));
        world.add_random(entity)?;
        population.shells = population.shells.saturating_add(1);
    }

    for n in 0..scenario.hunters {
        let hunter = HunterCritter::new(n % 2 == 0, world.rng_mut())
            .with_reach(shell_config.max_consume_distance);
        let entity = spawn_shell(
            ids.next(),
            Box::new(hunter),
            ActionRegistry::cash_grab(),
            shell_config,
        )
        .tagged(keys::PREDATOR, TagValue::Flag(true));
        world.add_random(entity)?;
        population.shells = population.shells.saturating_add(1);
    }

    for _ in 0..scenario.miners {
        let id = ids.next();
        let seeker = CoinSeeker::new();
        let entity = spawn_shell(
            id,
            Box::new(seeker),
            ActionRegistry::cash_grab(),
            shell_config,
        )
        .tagged(
            keys::MINABLE,
            TagValue::Account {
                bank: SCENARIO_BANK,
                account: AccountId::new(id.into_inner()),
            },
        );
        world.add_random(entity)?;
        population.shells = population.shells.saturating_add(1);
    }

    for n in 0..scenario.coins {
        let account = AccountId::new(COIN_ACCOUNT_BASE.saturating_add(n));
        world.add_random(Entity::coin(SCENARIO_BANK, account))?;
        world
            .banks_mut()
            .get_mut(SCENARIO_BANK)?
            .deposit(account, scenario.coin_balance);
        population.coins = population.coins.saturating_add(1);
    }

    let props = (0..scenario.rocks)
        .map(|_| Entity::rock())
        .chain((0..scenario.flowers).map(|_| Entity::flower()))
        .chain((0..scenario.bugs).map(|_| Entity::bug()));
    for prop in props {
        world.add_random(prop)?;
        population.props = population.props.saturating_add(1);
    }

    info!(
        shells = population.shells,
        coins = population.coins,
        props = population.props,
        "scenario populated"
    );
    Ok(population)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shellworld_core::WorldConfig;

    use super::*;

    fn world(rows: u32, cols: u32) -> World {
        World::from_config(&WorldConfig {
            rows,
            cols,
            ..WorldConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn default_scenario_is_placed_and_funded() {
        let config = SimulationConfig::default();
        let mut w = world(20, 20);
        let population = populate(&mut w, &config).unwrap();
        assert_eq!(population.shells, 9);
        assert_eq!(population.coins, 6);
        assert_eq!(population.props, 5);
        assert_eq!(w.grid().len(), 20);

        let bank = w.banks().get(SCENARIO_BANK).unwrap();
        assert_eq!(
            bank.balance(AccountId::new(COIN_ACCOUNT_BASE)),
            config.scenario.coin_balance
        );
        assert!(bank.verify_conservation().is_ok());
    }

    #[test]
    fn miners_are_bound_to_their_own_account() {
        let mut config = SimulationConfig::default();
        config.scenario.walkers = 0;
        config.scenario.hunters = 0;
        config.scenario.miners = 1;
        let mut w = world(5, 5);
        populate(&mut w, &config).unwrap();
        let miner = w
            .entities()
            .map(|(_, e)| e)
            .find(|e| e.as_shell().is_some())
            .unwrap();
        assert_eq!(
            miner.tags().account(keys::MINABLE),
            Some((SCENARIO_BANK, AccountId::new(1)))
        );
    }

    #[test]
    fn overfull_scenario_reports_no_vacancy() {
        let config = SimulationConfig::default();
        let mut w = world(2, 2);
        assert!(matches!(
            populate(&mut w, &config),
            Err(EngineError::World { .. })
        ));
    }
}
