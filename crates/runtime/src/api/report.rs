//! Serializable views of a match.

use serde::{Deserialize, Serialize};

use combat_core::{
    AbilityDisplay, AttackMarker, Character, CharacterId, CombatEngine, Phase, Stats,
};

use super::handle::MatchId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub stats: Stats,
    /// Ids of the modifiers still attached.
    pub modifiers: Vec<String>,
}

impl From<&Character> for CharacterSummary {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id.clone(),
            name: character.name.clone(),
            stats: character.stats,
            modifiers: character
                .modifiers()
                .iter()
                .map(|modifier| modifier.id.clone())
                .collect(),
        }
    }
}

/// Read-only view of a running match, cosmetic markers included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub match_id: MatchId,
    pub phase: Phase,
    pub round: u32,
    pub heroes: Vec<CharacterSummary>,
    pub enemy: Option<CharacterSummary>,
    pub current_attack: Option<AttackMarker>,
    pub current_ability: Option<AbilityDisplay>,
    pub game_over: bool,
    pub victory: bool,
}

impl MatchSnapshot {
    pub(crate) fn capture(match_id: MatchId, engine: &CombatEngine) -> Self {
        Self {
            match_id,
            phase: engine.phase(),
            round: engine.round(),
            heroes: engine.heroes().iter().map(CharacterSummary::from).collect(),
            enemy: engine.enemy().map(CharacterSummary::from),
            current_attack: engine.current_attack(),
            current_ability: engine.current_ability(),
            game_over: engine.is_game_over(),
            victory: engine.is_victory(),
        }
    }
}

/// Final result of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_id: MatchId,
    pub victory: bool,
    pub rounds: u32,
    pub heroes: Vec<CharacterSummary>,
    pub enemy: Option<CharacterSummary>,
}

impl MatchReport {
    pub(crate) fn capture(match_id: MatchId, engine: &CombatEngine) -> Self {
        Self {
            match_id,
            victory: engine.is_victory(),
            rounds: engine.round(),
            heroes: engine.heroes().iter().map(CharacterSummary::from).collect(),
            enemy: engine.enemy().map(CharacterSummary::from),
        }
    }

    /// Heroes still standing.
    pub fn survivors(&self) -> impl Iterator<Item = &CharacterSummary> {
        self.heroes.iter().filter(|hero| hero.stats.is_alive())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
