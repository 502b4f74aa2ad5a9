//! Equipment catalogue loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::equipment::{EquipmentRegistry, HatDefinition};
use crate::loaders::{LoadResult, read_file};

/// Equipment catalogue structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    pub hats: Vec<HatDefinition>,
}

pub struct EquipmentLoader;

impl EquipmentLoader {
    pub fn embedded() -> LoadResult<EquipmentRegistry> {
        Self::from_ron(include_str!("../../data/equipment.ron"))
    }

    /// Load the equipment catalogue from a RON file.
    pub fn load(path: &Path) -> LoadResult<EquipmentRegistry> {
        let content = read_file(path)?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> LoadResult<EquipmentRegistry> {
        let catalog: EquipmentCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse equipment catalog RON: {}", e))?;
        Ok(EquipmentRegistry::from_definitions(catalog.hats)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ContextKind, Effect, Stats, Trigger};

    #[test]
    fn embedded_catalog_has_sixteen_hats() {
        let registry = EquipmentLoader::embedded().unwrap();
        assert_eq!(registry.len(), 16);

        let wizard = registry.get(1).unwrap();
        assert_eq!(wizard.modifier_id, "hat_wizard");
        assert_eq!(wizard.trigger, Trigger::On(ContextKind::Attack));
        assert_eq!(wizard.effect, Effect::MultiplyDamage { factor: 2 });

        let christmas = registry.get(11).unwrap();
        assert_eq!(
            christmas.effect,
            Effect::Chain(vec![
                Effect::AddDamage { amount: 2 },
                Effect::RestoreHealth { amount: 1 },
            ])
        );
    }

    #[test]
    fn balanced_bonuses_raise_both_stats() {
        let registry = EquipmentLoader::embedded().unwrap();
        let base = Stats::full(20, 3);
        assert_eq!(
            registry.restat(base, base, Some(16)).unwrap(),
            Stats::full(35, 6)
        );
    }
}
