//! Encounter descriptions: one scaled boss against up to five heroes.

use combat_core::{Character, CombatEngine, Stats};
use tracing::info;

use crate::boss::boss_stats;
use crate::error::ContentError;
use crate::roster::GameContent;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSpec {
    pub boss: BossSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heroes: Vec<HeroSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossSpec {
    #[cfg_attr(feature = "serde", serde(default = "BossSpec::default_id"))]
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "BossSpec::default_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hat: Option<u32>,
}

impl BossSpec {
    fn default_id() -> String {
        "boss".to_owned()
    }

    fn default_level() -> u32 {
        1
    }
}

/// A hero either carries explicit stats or rolls them from a character type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroSpec {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub character_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Option<Stats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hat: Option<u32>,
}

impl EncounterSpec {
    /// Overrides the boss level, e.g. from the environment.
    #[must_use]
    pub fn with_boss_level(mut self, level: u32) -> Self {
        self.boss.level = level;
        self
    }

    /// Builds every character. Party size and id uniqueness are checked by
    /// the engine.
    pub fn build_roster(
        &self,
        content: &GameContent,
    ) -> Result<(Vec<Character>, Character), ContentError> {
        let heroes = self
            .heroes
            .iter()
            .map(|hero| hero.build(content))
            .collect::<Result<Vec<_>, _>>()?;
        let boss = self.boss.build(content)?;
        Ok((heroes, boss))
    }

    /// Builds the roster and initializes `engine` with it.
    pub fn load_into(
        &self,
        content: &GameContent,
        engine: &mut CombatEngine,
    ) -> Result<(), ContentError> {
        let (heroes, boss) = self.build_roster(content)?;
        info!(
            target: "combat::content",
            boss = %boss.name,
            level = self.boss.level,
            heroes = heroes.len(),
            "encounter loaded"
        );
        engine.initialize(heroes, Some(boss))?;
        Ok(())
    }
}

impl BossSpec {
    fn build(&self, content: &GameContent) -> Result<Character, ContentError> {
        let (stats, modifiers) = content.equip(boss_stats(self.level), self.hat)?;
        let abilities = content.abilities.instantiate_all(&self.abilities)?;
        Ok(Character::new(
            self.id.as_str(),
            self.name.clone(),
            stats,
            abilities,
            modifiers,
        ))
    }
}

impl HeroSpec {
    fn build(&self, content: &GameContent) -> Result<Character, ContentError> {
        let character_type = self
            .character_type
            .as_deref()
            .map(|name| content.character_type(name))
            .transpose()?;
        let base = self
            .stats
            .or_else(|| character_type.map(|ty| ty.base_stats))
            .ok_or_else(|| ContentError::MissingStats {
                id: self.id.clone(),
            })?;
        let name = self
            .name
            .clone()
            .or_else(|| character_type.map(|ty| ty.name.clone()))
            .unwrap_or_else(|| self.id.clone());

        let (stats, modifiers) = content.equip(base, self.hat)?;
        let abilities = content.abilities.instantiate_all(&self.abilities)?;
        Ok(Character::new(
            self.id.as_str(),
            name,
            stats,
            abilities,
            modifiers,
        ))
    }
}
