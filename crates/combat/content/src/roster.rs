//! Character construction from collaborator records.

use combat_core::{Character, CharacterId, Modifier, Stats};
use tracing::debug;

use crate::abilities::AbilityRegistry;
use crate::equipment::EquipmentRegistry;
use crate::error::ContentError;

/// Character construction input as supplied by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub display_name: String,
    pub stats: Stats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub granted_ability_ids: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipped_modifiers: Vec<Modifier>,
}

impl CharacterRecord {
    /// Instantiates the granted abilities and attaches the equipped modifiers.
    ///
    /// Fails on the first unknown ability id.
    pub fn build(self, abilities: &AbilityRegistry) -> Result<Character, ContentError> {
        let granted = abilities.instantiate_all(&self.granted_ability_ids)?;
        debug!(
            target: "combat::content",
            id = %self.id,
            abilities = granted.len(),
            modifiers = self.equipped_modifiers.len(),
            "character built"
        );
        Ok(Character::new(
            self.id,
            self.display_name,
            self.stats,
            granted,
            self.equipped_modifiers,
        ))
    }
}

/// Base stat template a hero is rolled from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterType {
    pub name: String,
    pub base_stats: Stats,
}

/// Every catalogue a match is assembled from.
#[derive(Clone, Debug, Default)]
pub struct GameContent {
    pub abilities: AbilityRegistry,
    pub equipment: EquipmentRegistry,
    pub character_types: Vec<CharacterType>,
}

impl GameContent {
    pub fn new(
        abilities: AbilityRegistry,
        equipment: EquipmentRegistry,
        character_types: Vec<CharacterType>,
    ) -> Self {
        Self {
            abilities,
            equipment,
            character_types,
        }
    }

    /// Looks up a character type by name, ignoring ASCII case.
    pub fn character_type(&self, name: &str) -> Result<&CharacterType, ContentError> {
        self.character_types
            .iter()
            .find(|ty| ty.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ContentError::UnknownCharacterType {
                name: name.to_owned(),
            })
    }

    /// Stats and passives for `base` wearing `hat_id`.
    pub fn equip(
        &self,
        base: Stats,
        hat_id: Option<u32>,
    ) -> Result<(Stats, Vec<Modifier>), ContentError> {
        let stats = self.equipment.restat(base, base, hat_id)?;
        let modifiers = hat_id
            .map(|id| self.equipment.modifier(id))
            .transpose()?
            .into_iter()
            .collect();
        Ok((stats, modifiers))
    }
}
