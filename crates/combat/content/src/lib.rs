//! Data-driven combat content and loaders.
//!
//! This crate houses the static catalogues a match is assembled from and
//! provides loaders for RON/TOML data files:
//! - Ability catalogue (data-driven via RON)
//! - Equipment (hat) catalogue (data-driven via RON)
//! - Character type catalogue (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//! - Encounter files (data-driven via TOML)
//!
//! Boss scaling is a pure function of the boss level and lives in [`boss`].
//! The engine only ever receives already-scaled stats.

pub mod abilities;
pub mod boss;
pub mod encounter;
pub mod equipment;
pub mod error;
pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use abilities::{AbilityDefinition, AbilityRegistry};
pub use boss::boss_stats;
pub use encounter::{BossSpec, EncounterSpec, HeroSpec};
pub use equipment::{EquipmentRegistry, HatDefinition, StatBonus};
pub use error::ContentError;
pub use roster::{CharacterRecord, CharacterType, GameContent};

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, CharacterTypeLoader, ConfigLoader, ContentFactory, EncounterLoader,
    EquipmentLoader,
};
