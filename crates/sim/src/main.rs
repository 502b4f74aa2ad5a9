//! Combat simulator binary.
//!
//! Loads the content catalogues and one encounter, runs the match to
//! completion on the async runtime and prints the result.
//!
//! # Examples
//!
//! ```bash
//! # Sample encounter with a tougher boss, JSON report
//! COMBAT_BOSS_LEVEL=5 COMBAT_REPORT_JSON=true cargo run -p combat-sim
//!
//! # Turn-by-turn debug logs
//! RUST_LOG=combat=debug cargo run -p combat-sim
//! ```

mod config;
mod logging;

use anyhow::Result;
use combat_content::ContentFactory;
use combat_runtime::{MatchEvent, MatchRegistry, MatchReport, Topic};
use tokio::sync::broadcast::error::RecvError;

use crate::config::SimConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting combat simulator");
    tracing::info!("Data directory: {}", config.data_dir.display());

    let factory = ContentFactory::new(&config.data_dir);
    let content = factory.load_content()?;
    let encounter = config.load_encounter(&factory)?;
    let registry = MatchRegistry::new(config.runtime_config(factory.load_config()?));

    let mut engine = registry.config().new_engine();
    encounter.load_into(&content, &mut engine)?;
    let handle = registry.adopt(engine).await;

    let mut actions = handle.subscribe(Topic::Action);
    let narrator = tokio::spawn(async move {
        loop {
            match actions.recv().await {
                Ok(MatchEvent::ActionResolved { round, record, .. }) => {
                    let target = record
                        .target
                        .as_ref()
                        .map(|id| id.as_str())
                        .unwrap_or("-");
                    println!(
                        "[round {round:>3}] {} uses {} on {target}",
                        record.actor, record.ability_id
                    );
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Narrator lagged, {} actions skipped", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let result = handle.run_to_completion(config.max_rounds).await;
    drop(handle);
    registry.shutdown().await?;
    narrator.await?;
    let report = result?;

    if config.report_json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &MatchReport) {
    let outcome = if report.victory { "Victory" } else { "Defeat" };
    println!("{outcome} after {} rounds", report.rounds);
    for character in report.heroes.iter().chain(report.enemy.iter()) {
        println!(
            "  {:<20} {:>4}/{:<4} atk {}",
            character.name,
            character.stats.health,
            character.stats.max_health,
            character.stats.attack
        );
    }
}
