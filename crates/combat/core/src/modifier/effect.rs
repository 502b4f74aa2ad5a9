//! Closed set of modifier effects.
//!
//! Effects are plain data. Magnitudes are captured when the owning modifier is
//! created, so applying an effect later never reads stale outer state.

use crate::character::CharacterId;
use crate::context::Context;
use crate::modifier::Modifier;
use crate::stats::{Combatant, StatDelta};

/// What a modifier does when it fires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Does nothing. Damage-over-time stacks are ticked by the round end instead.
    #[default]
    None,

    // ===== pipeline entry points =====
    /// Sends damage through the holder's damage pipeline.
    DealDamage { amount: i32, source: CharacterId },
    /// Sends healing through the holder's heal pipeline.
    Heal { amount: i32 },

    // ===== stat mutations (recorded for permanent modifiers) =====
    RaiseAttack { amount: i32 },
    /// Lowers attack, floored at 0.
    LowerAttack { amount: i32 },
    /// Raises max health and current health by the same amount.
    RaiseMaxHealth { amount: i32 },
    /// Adds health directly, capped at max health.
    RestoreHealth { amount: i32 },

    // ===== context rewrites =====
    AddDamage { amount: i32 },
    /// Subtracts from in-flight damage, floored at 0.
    ReduceDamage { amount: i32 },
    MultiplyDamage { factor: i32 },
    /// Adds damage only while the holder is at full health.
    AddDamageAtFullHealth { amount: i32 },
    /// Multiplies damage only while the holder is at or below half health.
    MultiplyDamageBelowHalfHealth { factor: i32 },
    AddHealing { amount: i32 },

    // ===== incoming modifier rewrites =====
    AddIncomingStacks { stacks: u32 },
    ExtendIncomingDuration { turns: u32 },

    /// Runs each effect in order.
    Chain(Vec<Effect>),
}

impl Effect {
    /// Applies the effect to a context and its holder. Returns the stat delta
    /// the effect committed directly to `attack` or `max_health`.
    pub fn apply<C: Combatant + ?Sized>(&self, ctx: &mut Context, holder: &mut C) -> StatDelta {
        match self {
            Self::None | Self::AddIncomingStacks { .. } | Self::ExtendIncomingDuration { .. } => {
                StatDelta::default()
            }
            Self::DealDamage { amount, source } => {
                holder.take_damage(*amount, source);
                StatDelta::default()
            }
            Self::Heal { amount } => {
                holder.heal(*amount);
                StatDelta::default()
            }
            Self::RaiseAttack { amount } => {
                holder.stats_mut().attack += amount;
                StatDelta {
                    attack: *amount,
                    max_health: 0,
                }
            }
            Self::LowerAttack { amount } => {
                let stats = holder.stats_mut();
                let before = stats.attack;
                stats.attack = (stats.attack - amount).max(0);
                StatDelta {
                    attack: stats.attack - before,
                    max_health: 0,
                }
            }
            Self::RaiseMaxHealth { amount } => {
                let stats = holder.stats_mut();
                stats.max_health += amount;
                stats.health = (stats.health + amount).clamp(0, stats.max_health);
                StatDelta {
                    attack: 0,
                    max_health: *amount,
                }
            }
            Self::RestoreHealth { amount } => {
                holder.restore_health(*amount);
                StatDelta::default()
            }
            Self::AddDamage { amount } => {
                if let Some(damage) = ctx.damage_mut() {
                    *damage += amount;
                }
                StatDelta::default()
            }
            Self::ReduceDamage { amount } => {
                if let Some(damage) = ctx.damage_mut() {
                    *damage = (*damage - amount).max(0);
                }
                StatDelta::default()
            }
            Self::MultiplyDamage { factor } => {
                if let Some(damage) = ctx.damage_mut() {
                    *damage *= factor;
                }
                StatDelta::default()
            }
            Self::AddDamageAtFullHealth { amount } => {
                if holder.stats().is_full_health()
                    && let Some(damage) = ctx.damage_mut()
                {
                    *damage += amount;
                }
                StatDelta::default()
            }
            Self::MultiplyDamageBelowHalfHealth { factor } => {
                let stats = holder.stats();
                if stats.health <= stats.max_health / 2
                    && let Some(damage) = ctx.damage_mut()
                {
                    *damage *= factor;
                }
                StatDelta::default()
            }
            Self::AddHealing { amount } => {
                if let Some(heal) = ctx.amount_mut() {
                    *heal += amount;
                }
                StatDelta::default()
            }
            Self::Chain(effects) => effects
                .iter()
                .fold(StatDelta::default(), |delta, effect| {
                    delta + effect.apply(ctx, holder)
                }),
        }
    }

    /// Rewrites a modifier that is about to be attached to the holder.
    pub fn reshape(&self, incoming: &mut Modifier) {
        match self {
            Self::AddIncomingStacks { stacks } => {
                incoming.stacks = incoming.stacks.saturating_add(*stacks);
            }
            Self::ExtendIncomingDuration { turns } => {
                if let Some(duration) = incoming.duration.as_mut() {
                    *duration = duration.saturating_add(*turns);
                }
            }
            Self::Chain(effects) => effects.iter().for_each(|effect| effect.reshape(incoming)),
            _ => {}
        }
    }
}
