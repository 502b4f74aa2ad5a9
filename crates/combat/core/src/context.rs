//! Typed combat events flowing through modifier chains.
//!
//! A [`Context`] is created for one invocation, passed by `&mut` through every
//! triggered modifier, and then consumed by whoever commits the base effect.

use crate::character::CharacterId;
use crate::stats::StatKind;

/// Tag of a [`Context`] variant. Also used as a modifier trigger and as the
/// context an ability declares it produces.
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
pub enum ContextKind {
    Attack,
    Heal,
    Buff,
    Debuff,
    Damage,
    TurnStart,
    TurnEnd,
}

impl ContextKind {
    /// Parses a context tag from external data, falling back to `Attack`.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            tracing::warn!(
                target: "combat::context",
                tag,
                "unknown context tag, treating as attack"
            );
            Self::Attack
        })
    }

    /// Whether modifiers produced under this context land on the source's own side.
    pub const fn targets_own_side(self) -> bool {
        matches!(
            self,
            Self::Heal | Self::Buff | Self::TurnStart | Self::TurnEnd
        )
    }
}

/// One in-flight combat event. Fields are rewritten in place by modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Context {
    Attack {
        target: CharacterId,
        damage: i32,
    },
    Heal {
        target: CharacterId,
        amount: i32,
    },
    Buff {
        target: CharacterId,
        stat: StatKind,
        value: i32,
        duration: Option<u32>,
    },
    Debuff {
        target: CharacterId,
        stat: StatKind,
        value: i32,
        duration: Option<u32>,
    },
    Damage {
        target: CharacterId,
        damage: i32,
        source: CharacterId,
    },
    TurnStart {
        character_id: CharacterId,
    },
    TurnEnd {
        character_id: CharacterId,
    },
}

impl Context {
    pub fn kind(&self) -> ContextKind {
        match self {
            Self::Attack { .. } => ContextKind::Attack,
            Self::Heal { .. } => ContextKind::Heal,
            Self::Buff { .. } => ContextKind::Buff,
            Self::Debuff { .. } => ContextKind::Debuff,
            Self::Damage { .. } => ContextKind::Damage,
            Self::TurnStart { .. } => ContextKind::TurnStart,
            Self::TurnEnd { .. } => ContextKind::TurnEnd,
        }
    }

    /// Declared target. Turn contexts have none.
    pub fn target(&self) -> Option<&CharacterId> {
        match self {
            Self::Attack { target, .. }
            | Self::Heal { target, .. }
            | Self::Buff { target, .. }
            | Self::Debuff { target, .. }
            | Self::Damage { target, .. } => Some(target),
            Self::TurnStart { .. } | Self::TurnEnd { .. } => None,
        }
    }

    pub fn damage(&self) -> Option<i32> {
        match self {
            Self::Attack { damage, .. } | Self::Damage { damage, .. } => Some(*damage),
            _ => None,
        }
    }

    pub fn damage_mut(&mut self) -> Option<&mut i32> {
        match self {
            Self::Attack { damage, .. } | Self::Damage { damage, .. } => Some(damage),
            _ => None,
        }
    }

    pub fn amount(&self) -> Option<i32> {
        match self {
            Self::Heal { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    pub fn amount_mut(&mut self) -> Option<&mut i32> {
        match self {
            Self::Heal { amount, .. } => Some(amount),
            _ => None,
        }
    }

    /// Magnitude of a buff or debuff.
    pub fn value(&self) -> Option<i32> {
        match self {
            Self::Buff { value, .. } | Self::Debuff { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn turn_start(character_id: CharacterId) -> Self {
        Self::TurnStart { character_id }
    }

    pub fn turn_end(character_id: CharacterId) -> Self {
        Self::TurnEnd { character_id }
    }
}
