//! Passive effects attached to characters.
//!
//! A modifier is either consumed once on arrival (`OneTime`) or kept in the
//! holder's list and evaluated against every context it processes until its
//! duration or stacks run out (`OnTrigger`).

mod effect;

pub use effect::Effect;

use crate::config::CombatConfig;
use crate::context::{Context, ContextKind};
use crate::stats::{Combatant, StatDelta};

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
pub enum ModifierType {
    OneTime,
    OnTrigger,
}

/// When an `OnTrigger` modifier fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    /// Fires on every context of this kind.
    On(ContextKind),
    /// Fires on contexts produced by abilities of this kind.
    OnAbility(ContextKind),
    /// Fires when another modifier is about to be attached to the holder.
    OnModifierAdded,
    /// Applied once on attach, never re-evaluated.
    Permanent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub id: String,
    pub name: String,
    pub description: String,
    pub modifier_type: ModifierType,
    pub trigger: Trigger,
    pub effect: Effect,
    /// Turns remaining. `None` never expires.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default = "Modifier::default_stacks"))]
    pub stacks: u32,
    /// Same-id stackable modifiers merge their stacks instead of duplicating.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
    /// Delta committed on attach by a permanent modifier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub applied: Option<StatDelta>,
}

impl Modifier {
    fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        modifier_type: ModifierType,
        trigger: Trigger,
        effect: Effect,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            modifier_type,
            trigger,
            effect,
            duration: None,
            stacks: Self::default_stacks(),
            stackable: false,
            applied: None,
        }
    }

    /// A modifier applied once on arrival and never stored.
    ///
    /// The trigger is informational only for one-time modifiers.
    pub fn one_time(id: impl Into<String>, name: impl Into<String>, effect: Effect) -> Self {
        Self::new(
            id,
            name,
            ModifierType::OneTime,
            Trigger::Permanent,
            effect,
        )
    }

    pub fn on_trigger(
        id: impl Into<String>,
        name: impl Into<String>,
        trigger: Trigger,
        effect: Effect,
    ) -> Self {
        Self::new(id, name, ModifierType::OnTrigger, trigger, effect)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_duration(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }

    #[must_use]
    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = stacks.max(1);
        self
    }

    #[must_use]
    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    fn default_stacks() -> u32 {
        1
    }

    pub fn is_one_time(&self) -> bool {
        self.modifier_type == ModifierType::OneTime
    }

    pub fn is_permanent(&self) -> bool {
        self.modifier_type == ModifierType::OnTrigger && self.trigger == Trigger::Permanent
    }

    /// Whether this modifier rewrites `ctx` when its holder processes it.
    pub fn should_trigger(&self, ctx: &Context) -> bool {
        if self.is_one_time() {
            return false;
        }
        match self.trigger {
            Trigger::On(kind) | Trigger::OnAbility(kind) => kind == ctx.kind(),
            Trigger::OnModifierAdded | Trigger::Permanent => false,
        }
    }

    pub fn should_trigger_on_modifier_added(&self) -> bool {
        self.modifier_type == ModifierType::OnTrigger && self.trigger == Trigger::OnModifierAdded
    }

    /// Runs the effect against `ctx` and its holder.
    pub fn apply<C: Combatant + ?Sized>(&self, ctx: &mut Context, holder: &mut C) -> StatDelta {
        self.effect.apply(ctx, holder)
    }

    /// Runs the effect with an incoming modifier as the mutation target.
    pub fn reshape(&self, incoming: &mut Modifier) {
        self.effect.reshape(incoming);
    }

    /// Damage-over-time modifiers are identified by a reserved id prefix.
    pub fn is_damage_over_time(&self) -> bool {
        self.id.starts_with(CombatConfig::DOT_PREFIX)
    }

    /// Whether this modifier merges with `other` on attach.
    pub fn stacks_with(&self, other: &Modifier) -> bool {
        self.stackable && other.stackable && self.id == other.id
    }
}
