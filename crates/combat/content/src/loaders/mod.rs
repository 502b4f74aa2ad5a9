//! Content loaders for reading combat data from files.
//!
//! Catalogues are RON, configuration and encounters are TOML. The ability,
//! equipment and character catalogues also ship embedded in the binary.

pub mod abilities;
pub mod characters;
pub mod config;
pub mod encounter;
pub mod equipment;
pub mod factory;

pub use abilities::AbilityLoader;
pub use characters::CharacterTypeLoader;
pub use config::ConfigLoader;
pub use encounter::EncounterLoader;
pub use equipment::EquipmentLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
