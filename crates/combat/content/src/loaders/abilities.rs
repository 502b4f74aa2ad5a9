//! Ability catalogue loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::abilities::{AbilityDefinition, AbilityRegistry};
use crate::loaders::{LoadResult, read_file};

/// Ability catalogue structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDefinition>,
}

/// Loader for the ability catalogue.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Loads the catalogue shipped with the crate.
    pub fn embedded() -> LoadResult<AbilityRegistry> {
        Self::from_ron(include_str!("../../data/abilities.ron"))
    }

    /// Load the ability catalogue from a RON file.
    pub fn load(path: &Path) -> LoadResult<AbilityRegistry> {
        let content = read_file(path)?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> LoadResult<AbilityRegistry> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;
        Ok(AbilityRegistry::from_definitions(catalog.abilities)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ContextKind, Executor};

    #[test]
    fn embedded_catalog_has_every_executor() {
        let registry = AbilityLoader::embedded().unwrap();
        assert_eq!(registry.len(), 8);

        let expected = [
            ("basic_attack", Executor::BasicAttack, 0),
            ("power_attack", Executor::PowerAttack, 2),
            ("heal", Executor::Heal, 3),
            ("buff_attack", Executor::BuffAttack, 4),
            ("debuff_attack", Executor::DebuffAttack, 3),
            ("shield", Executor::Shield, 4),
            ("poison", Executor::Poison, 3),
            ("light_up", Executor::LightUp, 3),
        ];
        for (id, executor, cooldown) in expected {
            let ability = registry.instantiate(id).unwrap();
            assert_eq!(ability.executor(), executor, "{id}");
            assert_eq!(ability.cooldown, cooldown, "{id}");
        }
        assert_eq!(
            registry.instantiate("light_up").unwrap().context_kind,
            ContextKind::Debuff
        );
    }

    #[test]
    fn unknown_context_tags_fall_back_to_attack() {
        let registry = AbilityLoader::from_ron(
            r#"(abilities: [(id: "basic_attack", name: "Jab", context: "summon")])"#,
        )
        .unwrap();
        let jab = registry.instantiate("basic_attack").unwrap();
        assert_eq!(jab.context_kind, ContextKind::Attack);
        assert_eq!(jab.cooldown, 0);
    }

    #[test]
    fn explicit_executor_names_are_accepted() {
        let registry = AbilityLoader::from_ron(
            r#"(abilities: [(id: "cleave", name: "Cleave", context: "attack", cooldown: 2, executor: Some(PowerAttack))])"#,
        )
        .unwrap();
        assert_eq!(
            registry.instantiate("cleave").unwrap().executor(),
            Executor::PowerAttack
        );
    }

    #[test]
    fn missing_files_name_the_path() {
        let err = AbilityLoader::load(Path::new("/nonexistent/abilities.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/abilities.ron"));
    }
}
