//! Combat actors and their damage/heal pipelines.
//!
//! A [`Character`] owns every mutation of its own stats. Other actors reach it
//! only through [`Character::take_damage`], [`Character::heal`] or modifiers
//! attached to it.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::ability::Ability;
use crate::config::CombatConfig;
use crate::context::Context;
use crate::error::CombatError;
use crate::modifier::Modifier;
use crate::stats::{CanHeal, CanTakeDamage, HasStats, Stats};

/// Stable identifier of a character within a match.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for CharacterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Source id attributed to damage-over-time ticks.
const BURN_SOURCE: &str = "burn";

#[derive(Clone, Debug)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub stats: Stats,
    abilities: Vec<Ability>,
    modifiers: Vec<Modifier>,
    chain_depth: u8,
}

impl Character {
    pub fn new(
        id: impl Into<CharacterId>,
        name: impl Into<String>,
        stats: Stats,
        abilities: Vec<Ability>,
        modifiers: Vec<Modifier>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats,
            abilities,
            modifiers,
            chain_depth: 0,
        }
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn ability(&self, id: &str) -> Option<&Ability> {
        self.abilities.iter().find(|ability| ability.id == id)
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn modifier(&self, id: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|modifier| modifier.id == id)
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    /// Attaches a modifier, merging stacks into a same-id stackable entry.
    ///
    /// Non-stackable modifiers are appended even when the id already exists.
    pub fn add_modifier(&mut self, modifier: Modifier) {
        if let Some(existing) = self
            .modifiers
            .iter_mut()
            .find(|existing| existing.stacks_with(&modifier))
        {
            existing.stacks = existing.stacks.saturating_add(modifier.stacks);
            debug!(
                target: "combat::character",
                character = %self.id,
                modifier = %existing.id,
                stacks = existing.stacks,
                "merged modifier stacks"
            );
            return;
        }

        debug!(
            target: "combat::character",
            character = %self.id,
            modifier = %modifier.id,
            "attached modifier"
        );
        self.modifiers.push(modifier);
    }

    /// Removes every modifier with `id`. Returns whether anything was removed.
    pub fn remove_modifier(&mut self, id: &str) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|modifier| modifier.id != id);
        before != self.modifiers.len()
    }

    /// Runs every triggered modifier against `ctx` in attachment order.
    ///
    /// The triggered set is snapshotted before iterating, so effects that
    /// re-enter the pipeline see a stable list.
    pub fn process_modifiers(&mut self, ctx: &mut Context) {
        if self.chain_depth >= CombatConfig::MAX_MODIFIER_CHAIN_DEPTH {
            warn!(
                target: "combat::character",
                character = %self.id,
                kind = %ctx.kind(),
                depth = self.chain_depth,
                "modifier chain too deep, skipping"
            );
            return;
        }

        let triggered: Vec<Modifier> = self
            .modifiers
            .iter()
            .filter(|modifier| modifier.should_trigger(ctx))
            .cloned()
            .collect();
        if triggered.is_empty() {
            return;
        }

        self.chain_depth += 1;
        for modifier in &triggered {
            trace!(
                target: "combat::character",
                character = %self.id,
                modifier = %modifier.id,
                kind = %ctx.kind(),
                "modifier triggered"
            );
            modifier.apply(ctx, self);
        }
        self.chain_depth -= 1;
    }

    /// Lets modifiers with an `OnModifierAdded` trigger reshape an incoming one.
    pub fn process_modifiers_on_modifier(&self, mut incoming: Modifier, ctx: &Context) -> Modifier {
        for modifier in self
            .modifiers
            .iter()
            .filter(|modifier| modifier.should_trigger_on_modifier_added())
        {
            trace!(
                target: "combat::character",
                character = %self.id,
                modifier = %modifier.id,
                incoming = %incoming.id,
                kind = %ctx.kind(),
                "reshaping incoming modifier"
            );
            modifier.reshape(&mut incoming);
        }
        incoming
    }

    /// Commits post-modifier damage. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: i32, source: &CharacterId) -> i32 {
        let mut ctx = Context::Damage {
            target: self.id.clone(),
            damage: amount,
            source: source.clone(),
        };
        self.process_modifiers(&mut ctx);

        let damage = ctx.damage().unwrap_or(amount).max(0);
        self.stats.lose(damage)
    }

    /// Commits post-modifier healing. Returns the health actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let mut ctx = Context::Heal {
            target: self.id.clone(),
            amount,
        };
        self.process_modifiers(&mut ctx);

        let amount = ctx.amount().unwrap_or(amount).max(0);
        self.stats.restore(amount)
    }

    pub fn use_ability(
        &mut self,
        ability_id: &str,
        ctx: &Context,
    ) -> Result<Vec<Modifier>, CombatError> {
        let Some(ability) = self
            .abilities
            .iter_mut()
            .find(|ability| ability.id == ability_id)
        else {
            return Err(CombatError::AbilityNotFound {
                character: self.id.clone(),
                ability: ability_id.to_owned(),
            });
        };
        ability.activate(ctx, &self.id)
    }

    pub fn tick_cooldowns(&mut self) {
        self.abilities.iter_mut().for_each(Ability::tick_cooldown);
    }

    /// Applies a permanent modifier once and keeps it so it can expire.
    pub fn attach_permanent(&mut self, mut modifier: Modifier, ctx: &mut Context) {
        let delta = modifier.apply(ctx, self);
        modifier.applied = (!delta.is_zero()).then_some(delta);
        self.add_modifier(modifier);
    }

    /// Deals one damage per stack for every damage-over-time modifier, then
    /// drops one stack from each. Exhausted modifiers are removed.
    pub fn tick_damage_over_time(&mut self) {
        let source = CharacterId::from(BURN_SOURCE);
        for index in 0..self.modifiers.len() {
            let modifier = &self.modifiers[index];
            if !modifier.is_damage_over_time() || modifier.stacks == 0 {
                continue;
            }
            let stacks = modifier.stacks;
            let dealt = self.take_damage(i32::try_from(stacks).unwrap_or(i32::MAX), &source);

            let modifier = &mut self.modifiers[index];
            modifier.stacks -= 1;
            trace!(
                target: "combat::character",
                character = %self.id,
                modifier = %modifier.id,
                dealt,
                stacks = modifier.stacks,
                "damage over time ticked"
            );
        }
        self.modifiers
            .retain(|modifier| !(modifier.is_damage_over_time() && modifier.stacks == 0));
    }

    /// Counts down timed modifiers and removes the exhausted ones, reverting
    /// whatever stat delta they committed on attach.
    pub fn tick_modifier_durations(&mut self) {
        let mut expired = Vec::new();
        self.modifiers.retain_mut(|modifier| match modifier.duration.as_mut() {
            Some(turns) => {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push((modifier.id.clone(), modifier.applied));
                    false
                } else {
                    true
                }
            }
            None => true,
        });

        for (id, applied) in expired {
            if let Some(delta) = applied {
                self.stats.revert(delta);
            }
            debug!(
                target: "combat::character",
                character = %self.id,
                modifier = %id,
                "modifier expired"
            );
        }
    }
}

impl HasStats for Character {
    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }
}

impl CanTakeDamage for Character {
    fn take_damage(&mut self, amount: i32, source: &CharacterId) -> i32 {
        Character::take_damage(self, amount, source)
    }
}

impl CanHeal for Character {
    fn heal(&mut self, amount: i32) -> i32 {
        Character::heal(self, amount)
    }
}
