//! Character stat shape and the capability traits effects mutate through.
//!
//! Effects never see a concrete [`Character`](crate::Character). They receive
//! anything implementing [`Combatant`], which keeps modifiers and characters
//! free of a cyclic dependency.

use crate::character::CharacterId;

/// Health and attack snapshot of one character.
///
/// `0 <= health <= max_health` holds after every damage or heal commit.
/// `attack` is only floored by debuff logic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stats {
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
}

impl Stats {
    /// Builds a stat block, clamping `health` into `0..=max_health`.
    pub fn new(health: i32, max_health: i32, attack: i32) -> Self {
        let max_health = max_health.max(0);
        Self {
            health: health.clamp(0, max_health),
            max_health,
            attack,
        }
    }

    /// A full-health stat block.
    pub fn full(max_health: i32, attack: i32) -> Self {
        Self::new(max_health, max_health, attack)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_full_health(&self) -> bool {
        self.health >= self.max_health
    }

    /// Adds health directly, capped at `max_health`. Returns the amount restored.
    pub fn restore(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health);
        self.health - before
    }

    /// Removes health directly, floored at 0. Returns the amount lost.
    pub fn lose(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health - amount.max(0)).max(0);
        before - self.health
    }

    /// Undoes a previously applied delta and re-clamps health.
    pub fn revert(&mut self, delta: StatDelta) {
        self.attack = (self.attack - delta.attack).max(0);
        self.max_health = (self.max_health - delta.max_health).max(0);
        self.health = self.health.clamp(0, self.max_health);
    }

    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::MaxHealth => self.max_health,
            StatKind::Attack => self.attack,
        }
    }
}

/// Stat change applied by a permanent modifier, kept so it can be reverted on expiry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StatDelta {
    pub attack: i32,
    pub max_health: i32,
}

impl StatDelta {
    pub fn is_zero(&self) -> bool {
        self.attack == 0 && self.max_health == 0
    }
}

impl core::ops::Add for StatDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            attack: self.attack + rhs.attack,
            max_health: self.max_health + rhs.max_health,
        }
    }
}

/// Stat a buff or debuff context addresses.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Health,
    MaxHealth,
    #[default]
    Attack,
}

/// Read and write access to a stat block.
pub trait HasStats {
    fn stats(&self) -> &Stats;

    fn stats_mut(&mut self) -> &mut Stats;

    /// Direct health restore that bypasses the heal pipeline.
    fn restore_health(&mut self, amount: i32) -> i32 {
        self.stats_mut().restore(amount)
    }
}

/// Entry point of the damage pipeline.
pub trait CanTakeDamage {
    /// Runs a damage context through the receiver's modifiers and commits the
    /// post-modifier amount. Returns the health actually lost.
    fn take_damage(&mut self, amount: i32, source: &CharacterId) -> i32;
}

/// Entry point of the heal pipeline.
pub trait CanHeal {
    /// Runs a heal context through the receiver's modifiers and commits the
    /// post-modifier amount. Returns the health actually restored.
    fn heal(&mut self, amount: i32) -> i32;
}

/// Everything a modifier effect may touch.
pub trait Combatant: HasStats + CanTakeDamage + CanHeal {}

impl<T: HasStats + CanTakeDamage + CanHeal> Combatant for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_health_into_range() {
        assert_eq!(Stats::new(120, 100, 5).health, 100);
        assert_eq!(Stats::new(-3, 100, 5).health, 0);
    }

    #[test]
    fn restore_and_lose_stay_in_bounds() {
        let mut stats = Stats::new(95, 100, 5);
        assert_eq!(stats.restore(10), 5);
        assert_eq!(stats.health, 100);

        assert_eq!(stats.lose(130), 100);
        assert_eq!(stats.health, 0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn revert_clamps_health_to_restored_max() {
        let mut stats = Stats::full(35, 10);
        stats.revert(StatDelta {
            attack: 4,
            max_health: 5,
        });
        assert_eq!(stats, Stats::new(30, 30, 6));
    }

    #[test]
    fn stat_kind_parses_snake_case() {
        assert_eq!("max_health".parse::<StatKind>(), Ok(StatKind::MaxHealth));
        assert_eq!(StatKind::Attack.as_ref(), "attack");
    }
}
