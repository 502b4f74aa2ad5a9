//! Content factory for building catalogues from data files.

use std::path::{Path, PathBuf};

use combat_core::CombatConfig;

use crate::abilities::AbilityRegistry;
use crate::encounter::EncounterSpec;
use crate::equipment::EquipmentRegistry;
use crate::loaders::{
    AbilityLoader, CharacterTypeLoader, ConfigLoader, EncounterLoader, EquipmentLoader, LoadResult,
};
use crate::roster::{CharacterType, GameContent};

/// Content factory that loads all combat content from a data directory.
///
/// Catalogue files missing from the directory fall back to the embedded
/// copies. A missing `config.toml` falls back to defaults.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── equipment.ron
/// ├── characters.ron
/// └── encounters/
///     └── sample.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the ability catalogue from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityRegistry> {
        let path = self.data_dir.join("abilities.ron");
        if !path.exists() {
            return AbilityLoader::embedded();
        }
        AbilityLoader::load(&path)
    }

    /// Load the hat catalogue from `equipment.ron`.
    pub fn load_equipment(&self) -> LoadResult<EquipmentRegistry> {
        let path = self.data_dir.join("equipment.ron");
        if !path.exists() {
            return EquipmentLoader::embedded();
        }
        EquipmentLoader::load(&path)
    }

    /// Load hero character types from `characters.ron`.
    pub fn load_character_types(&self) -> LoadResult<Vec<CharacterType>> {
        let path = self.data_dir.join("characters.ron");
        if !path.exists() {
            return CharacterTypeLoader::embedded();
        }
        CharacterTypeLoader::load(&path)
    }

    /// Load every catalogue.
    pub fn load_content(&self) -> LoadResult<GameContent> {
        Ok(GameContent::new(
            self.load_abilities()?,
            self.load_equipment()?,
            self.load_character_types()?,
        ))
    }

    /// Load an encounter from `encounters/{name}.toml`.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the encounter file (without `.toml` extension)
    pub fn load_encounter(&self, name: &str) -> LoadResult<EncounterSpec> {
        let path = self
            .data_dir
            .join("encounters")
            .join(format!("{}.toml", name));
        EncounterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directories_use_embedded_content() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        let content = factory.load_content().unwrap();
        assert_eq!(content.abilities.len(), 8);
        assert_eq!(content.equipment.len(), 16);
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert!(factory.load_encounter("missing").is_err());
    }
}
