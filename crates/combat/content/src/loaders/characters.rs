//! Character type catalogue loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::roster::CharacterType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterTypeCatalog {
    pub types: Vec<CharacterType>,
}

/// Loader for hero character types from RON files.
pub struct CharacterTypeLoader;

impl CharacterTypeLoader {
    pub fn embedded() -> LoadResult<Vec<CharacterType>> {
        Self::from_ron(include_str!("../../data/characters.ron"))
    }

    pub fn load(path: &Path) -> LoadResult<Vec<CharacterType>> {
        let content = read_file(path)?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> LoadResult<Vec<CharacterType>> {
        let catalog: CharacterTypeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character type RON: {}", e))?;
        Ok(catalog.types)
    }
}
