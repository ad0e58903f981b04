//! Headless runner for the Shellworld simulation.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `shellworld-config.yaml`, or use defaults
//! 3. Create the world (bounded unless `rows` or `cols` is zero)
//! 4. Scatter the configured scenario over the grid
//! 5. Run the configured number of ticks, logging each summary
//! 6. Log final balances and the closing snapshot

mod error;
mod spawner;

use std::path::Path;

use shellworld_core::{SimulationConfig, TickSummary, World};
use shellworld_types::ReportEvent;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const CONFIG_PATH: &str = "shellworld-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, world construction, or seeding
/// fails. The tick loop itself cannot fail.
fn main() -> Result<(), EngineError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("shellworld-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        rows = config.world.rows,
        cols = config.world.cols,
        seed = config.world.seed,
        ticks = config.world.ticks,
        "Configuration loaded"
    );

    // 3. Create the world.
    let mut world = World::from_config(&config.world)?;

    // 4. Seed the scenario.
    spawner::populate(&mut world, &config)?;

    // 5. Run.
    for _ in 0..config.world.ticks {
        let summary = world.step();
        log_summary(&summary);
    }

    // 6. Report.
    if let Some(bank) = world.banks().get(spawner::SCENARIO_BANK) {
        for (account, balance) in bank.accounts() {
            if account.into_inner() < spawner::COIN_ACCOUNT_BASE {
                info!(%account, balance, "miner balance");
            }
        }
    }
    for (id, bank) in world.banks() {
        if let Err(err) = bank.verify_conservation() {
            warn!(bank = %id, error = %err, "bank failed its conservation check");
        }
    }
    let snapshot = serde_json::to_string(&world.snapshot())?;
    debug!(snapshot = %snapshot, "final snapshot");
    info!(
        ticks = world.tick(),
        occupants = world.grid().len(),
        "shellworld-engine finished"
    );
    Ok(())
}

/// Load configuration from [`CONFIG_PATH`], falling back to defaults.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}

fn log_summary(summary: &TickSummary) {
    let collisions = summary
        .reports
        .iter()
        .filter(|r| matches!(r, ReportEvent::Collision { .. }))
        .count();
    let messages = summary.reports.len().saturating_sub(collisions);
    debug!(
        tick = summary.tick,
        acted = summary.acted,
        skipped = summary.skipped,
        collisions,
        messages,
        "tick complete"
    );
}
