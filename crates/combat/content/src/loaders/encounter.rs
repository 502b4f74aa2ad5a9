//! Encounter file loader.

use std::path::Path;

use crate::encounter::EncounterSpec;
use crate::loaders::{LoadResult, read_file};

pub struct EncounterLoader;

impl EncounterLoader {
    /// Load an encounter from a TOML file.
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse encounter TOML {}: {}", path.display(), e)
        })
    }
}
