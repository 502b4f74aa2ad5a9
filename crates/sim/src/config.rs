//! Simulator configuration read from the environment.
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use combat_content::{ContentFactory, EncounterLoader, EncounterSpec};
use combat_core::CombatConfig;
use combat_runtime::RuntimeConfig;

/// Simulator settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    /// Encounter name under `encounters/`, or a path to a `.toml` file.
    pub encounter: String,
    /// Overrides the encounter's boss level.
    pub boss_level: Option<u32>,
    pub max_rounds: u32,
    pub tick_delay: Duration,
    /// Print the final report as JSON instead of a summary.
    pub report_json: bool,
    /// Also write logs to `combat-sim.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("crates/combat/content/data"),
            encounter: "sample".to_owned(),
            boss_level: None,
            max_rounds: RuntimeConfig::default().max_rounds,
            tick_delay: Duration::ZERO,
            report_json: false,
            log_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content directory (default: `crates/combat/content/data`)
    /// - `COMBAT_ENCOUNTER` - Encounter name or file path (default: `sample`)
    /// - `COMBAT_BOSS_LEVEL` - Boss level override
    /// - `COMBAT_MAX_ROUNDS` - Round limit (default: 100)
    /// - `COMBAT_TICK_DELAY_MS` - Pause between turns in milliseconds (default: 0)
    /// - `COMBAT_REPORT_JSON` - Print the report as JSON (default: false)
    /// - `COMBAT_LOG_DIR` - Directory for a log file copy
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(dir) = read("COMBAT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(encounter) = read("COMBAT_ENCOUNTER") {
            config.encounter = encounter;
        }
        config.boss_level = parse(read("COMBAT_BOSS_LEVEL"));
        if let Some(max_rounds) = parse(read("COMBAT_MAX_ROUNDS")) {
            config.max_rounds = max_rounds;
        }
        if let Some(ms) = parse(read("COMBAT_TICK_DELAY_MS")) {
            config.tick_delay = Duration::from_millis(ms);
        }
        if let Some(json) = parse(read("COMBAT_REPORT_JSON")) {
            config.report_json = json;
        }
        config.log_dir = read("COMBAT_LOG_DIR").map(PathBuf::from);
        config
    }

    /// Loads the configured encounter and applies the boss level override.
    pub fn load_encounter(&self, factory: &ContentFactory) -> anyhow::Result<EncounterSpec> {
        let encounter = if self.encounter.ends_with(".toml") {
            EncounterLoader::load(Path::new(&self.encounter))?
        } else {
            factory.load_encounter(&self.encounter)?
        };
        Ok(match self.boss_level {
            Some(level) => encounter.with_boss_level(level),
            None => encounter,
        })
    }

    pub fn runtime_config(&self, combat: CombatConfig) -> RuntimeConfig {
        RuntimeConfig {
            combat,
            tick_delay: self.tick_delay,
            max_rounds: self.max_rounds,
            ..RuntimeConfig::default()
        }
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}
