//! Ability executors: pure functions from a populated context to modifiers.

use crate::character::CharacterId;
use crate::context::{Context, ContextKind};
use crate::error::CombatError;
use crate::modifier::{Effect, Modifier, Trigger};

/// One use of an ability, used to derive deterministic modifier ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub ability_id: String,
    pub source: CharacterId,
    pub serial: u64,
}

impl Invocation {
    pub fn modifier_id(&self) -> String {
        format!("{}_{}_{}", self.ability_id, self.source, self.serial)
    }
}

/// Built-in executors, one per catalogue ability.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Executor {
    BasicAttack,
    PowerAttack,
    Heal,
    BuffAttack,
    DebuffAttack,
    Shield,
    Poison,
    LightUp,
}

impl Executor {
    /// Fixed id shared by every light-up application so stacks merge.
    pub const LIGHT_UP_ID: &'static str = "burn_light_up";
    pub const LIGHT_UP_STACKS: u32 = 5;

    const BUFF_FALLBACK: i32 = 10;
    const DEBUFF_FALLBACK: i32 = 5;
    const SHIELD_FALLBACK: i32 = 5;
    const POISON_FALLBACK: i32 = 5;

    const BUFF_DURATION: u32 = 3;
    const DEBUFF_DURATION: u32 = 2;
    const SHIELD_DURATION: u32 = 3;
    const POISON_DURATION: u32 = 3;

    /// Context kind this executor reads its magnitude from.
    pub const fn context_kind(self) -> ContextKind {
        match self {
            Self::BasicAttack | Self::PowerAttack => ContextKind::Attack,
            Self::Heal => ContextKind::Heal,
            Self::BuffAttack | Self::Shield => ContextKind::Buff,
            Self::DebuffAttack | Self::Poison | Self::LightUp => ContextKind::Debuff,
        }
    }

    pub fn execute(
        self,
        ctx: &Context,
        invocation: &Invocation,
    ) -> Result<Vec<Modifier>, CombatError> {
        let id = invocation.modifier_id();
        let source = invocation.source.clone();

        let modifier = match self {
            Self::BasicAttack => {
                let damage = self.read(ctx.damage(), ctx, invocation)?;
                Modifier::one_time(
                    id,
                    "Basic Attack",
                    Effect::DealDamage {
                        amount: damage,
                        source,
                    },
                )
            }
            Self::PowerAttack => {
                let damage = self.read(ctx.damage(), ctx, invocation)?;
                Modifier::one_time(
                    id,
                    "Power Attack",
                    Effect::DealDamage {
                        amount: (damage * 3).div_euclid(2),
                        source,
                    },
                )
            }
            Self::Heal => {
                let amount = self.read(ctx.amount(), ctx, invocation)?;
                Modifier::one_time(
                    id,
                    "Heal",
                    Effect::Heal {
                        amount: (amount * 6).div_euclid(5),
                    },
                )
            }
            Self::BuffAttack => {
                let value = self.magnitude(ctx, invocation, Self::BUFF_FALLBACK)?;
                Modifier::on_trigger(id, "Attack Up", Trigger::Permanent, Effect::RaiseAttack {
                    amount: value,
                })
                .with_description(format!("+{value} attack"))
                .with_duration(Self::BUFF_DURATION)
            }
            Self::DebuffAttack => {
                let value = self.magnitude(ctx, invocation, Self::DEBUFF_FALLBACK)?;
                Modifier::on_trigger(id, "Attack Down", Trigger::Permanent, Effect::LowerAttack {
                    amount: value,
                })
                .with_description(format!("-{value} attack"))
                .with_duration(Self::DEBUFF_DURATION)
            }
            Self::Shield => {
                let value = self.magnitude(ctx, invocation, Self::SHIELD_FALLBACK)?;
                Modifier::on_trigger(id, "Shield", Trigger::Permanent, Effect::RaiseMaxHealth {
                    amount: value,
                })
                .with_description(format!("+{value} max health"))
                .with_duration(Self::SHIELD_DURATION)
            }
            Self::Poison => {
                let value = self.magnitude(ctx, invocation, Self::POISON_FALLBACK)?;
                // Ticks on turn end; a damage trigger would re-enter its own pipeline.
                Modifier::on_trigger(
                    id,
                    "Poison",
                    Trigger::On(ContextKind::TurnEnd),
                    Effect::DealDamage {
                        amount: value.div_euclid(2),
                        source,
                    },
                )
                .with_description(format!("{} damage per round", value.div_euclid(2)))
                .with_duration(Self::POISON_DURATION)
            }
            Self::LightUp => Modifier::on_trigger(
                Self::LIGHT_UP_ID,
                "Burning",
                Trigger::On(ContextKind::TurnEnd),
                Effect::None,
            )
            .with_description("Takes 1 damage per stack each round")
            .with_stacks(Self::LIGHT_UP_STACKS)
            .stackable(),
        };

        Ok(vec![modifier])
    }

    /// Buff/debuff value, substituting the fallback when the context carries 0.
    fn magnitude(
        self,
        ctx: &Context,
        invocation: &Invocation,
        fallback: i32,
    ) -> Result<i32, CombatError> {
        let value = self.read(ctx.value(), ctx, invocation)?;
        Ok(if value == 0 { fallback } else { value })
    }

    fn read(
        self,
        field: Option<i32>,
        ctx: &Context,
        invocation: &Invocation,
    ) -> Result<i32, CombatError> {
        field.ok_or_else(|| CombatError::ContextMismatch {
            ability: invocation.ability_id.clone(),
            expected: self.context_kind(),
            found: ctx.kind(),
        })
    }
}
