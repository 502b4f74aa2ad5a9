//! Round and turn orchestration.
//!
//! The [`CombatEngine`] owns one match: the party, the boss, the phase cursor
//! and the cosmetic markers. It is driven step by step by a single external
//! caller and performs no scheduling of its own.
//!
//! ```text
//! round-start ──start_round()──▶ action ──process_next_action()×N──▶ round-end
//!      ▲                                                                 │
//!      └──────────────────────────── start_round() ◀─────────────────────┘
//! ```
//!
//! Game over is a derived predicate, never a phase.

mod markers;
mod routing;
mod turns;

pub use markers::{
    AbilityDisplay, AttackMarker, DisplayMarkers, MarkerScheduler, MarkerSlot, RetainMarkers,
};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use arrayvec::ArrayVec;
use tracing::info;

use crate::character::{Character, CharacterId};
use crate::config::CombatConfig;
use crate::context::ContextKind;
use crate::error::CombatError;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Phase {
    #[default]
    RoundStart,
    Action,
    RoundEnd,
}

/// Which side of the fight a character belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Heroes,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Heroes => Self::Enemy,
            Self::Enemy => Self::Heroes,
        }
    }
}

/// Summary of one resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub actor: CharacterId,
    pub side: Side,
    pub ability_id: String,
    pub kind: ContextKind,
    pub target: Option<CharacterId>,
}

type Party = ArrayVec<Character, { CombatConfig::MAX_HEROES }>;

/// Caller-owned engine for one match.
#[derive(Debug)]
pub struct CombatEngine {
    config: CombatConfig,
    phase: Phase,
    heroes: Party,
    enemy: Option<Character>,
    current_hero_index: usize,
    boss_acted: bool,
    round: u32,
    markers: DisplayMarkers,
}

impl CombatEngine {
    /// Creates an empty engine whose markers are retained until overwritten.
    pub fn new(config: CombatConfig) -> Self {
        Self::with_scheduler(config, Arc::new(RetainMarkers))
    }

    /// Creates an empty engine clearing markers through `scheduler`.
    pub fn with_scheduler(config: CombatConfig, scheduler: Arc<dyn MarkerScheduler>) -> Self {
        let lifetime = Duration::from_millis(config.marker_lifetime_ms);
        Self {
            config,
            phase: Phase::RoundStart,
            heroes: ArrayVec::new(),
            enemy: None,
            current_hero_index: 0,
            boss_acted: false,
            round: 0,
            markers: DisplayMarkers::new(scheduler, lifetime),
        }
    }

    /// Loads a roster and resets the phase cursor.
    ///
    /// Fails without touching the current roster when more than
    /// [`CombatConfig::MAX_HEROES`] heroes are supplied or when two
    /// characters share an id.
    pub fn initialize(
        &mut self,
        heroes: Vec<Character>,
        enemy: Option<Character>,
    ) -> Result<(), CombatError> {
        let count = heroes.len();
        let mut seen = HashSet::with_capacity(count + 1);
        for character in heroes.iter().chain(enemy.iter()) {
            if !seen.insert(&character.id) {
                return Err(CombatError::DuplicateCharacter {
                    id: character.id.clone(),
                });
            }
        }

        let mut party = Party::new();
        for hero in heroes {
            party.try_push(hero).map_err(|_| CombatError::TooManyHeroes {
                count,
                max: CombatConfig::MAX_HEROES,
            })?;
        }

        self.heroes = party;
        self.enemy = enemy;
        self.phase = Phase::RoundStart;
        self.current_hero_index = 0;
        self.boss_acted = false;
        self.round = 0;
        self.markers.clear();

        info!(
            target: "combat::engine",
            heroes = count,
            enemy = ?self.enemy.as_ref().map(|enemy| &enemy.id),
            "combat initialized"
        );
        Ok(())
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn heroes(&self) -> &[Character] {
        &self.heroes
    }

    pub fn enemy(&self) -> Option<&Character> {
        self.enemy.as_ref()
    }

    pub fn current_hero_index(&self) -> usize {
        self.current_hero_index
    }

    pub fn boss_acted(&self) -> bool {
        self.boss_acted
    }

    /// Hero under the turn cursor, if the cursor still points into the party.
    pub fn current_hero(&self) -> Option<&Character> {
        self.heroes.get(self.current_hero_index)
    }

    pub fn character_by_id(&self, id: &CharacterId) -> Option<&Character> {
        self.heroes
            .iter()
            .chain(self.enemy.iter())
            .find(|character| &character.id == id)
    }

    pub fn markers(&self) -> &DisplayMarkers {
        &self.markers
    }

    pub fn current_attack(&self) -> Option<AttackMarker> {
        self.markers.attack()
    }

    pub fn current_ability(&self) -> Option<AbilityDisplay> {
        self.markers.ability()
    }

    fn enemy_defeated(&self) -> bool {
        self.enemy.as_ref().is_some_and(|enemy| !enemy.is_alive())
    }

    fn party_defeated(&self) -> bool {
        self.heroes.iter().all(|hero| !hero.is_alive())
    }

    /// True once the boss or the whole party is down.
    pub fn is_game_over(&self) -> bool {
        self.enemy_defeated() || self.party_defeated()
    }

    /// True when the boss is down and at least one hero still stands.
    pub fn is_victory(&self) -> bool {
        self.enemy_defeated() && !self.party_defeated()
    }

    pub(crate) fn side_of(&self, id: &CharacterId) -> Option<Side> {
        if self.enemy.as_ref().is_some_and(|enemy| &enemy.id == id) {
            return Some(Side::Enemy);
        }
        self.heroes
            .iter()
            .any(|hero| &hero.id == id)
            .then_some(Side::Heroes)
    }

    pub(crate) fn characters_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.heroes.iter_mut().chain(self.enemy.iter_mut())
    }
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}
