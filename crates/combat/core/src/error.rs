//! Common error infrastructure for combat-core.
//!
//! Every fallible operation in the crate returns [`CombatError`]. The
//! [`GameError`] trait layers a severity classification on top so drivers can
//! tell rejected input apart from engine bugs.

use crate::character::CharacterId;
use crate::context::ContextKind;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: programmer errors, e.g. using an ability that is not ready
/// - **Fatal**: the match state can no longer be trusted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error, e.g. an oversized party or an unknown ability.
    Validation,

    /// Internal error, e.g. a cooldown desync or a context of the wrong kind.
    ///
    /// The engine filters on readiness before acting, so these indicate bugs.
    Internal,

    /// Fatal error, the match must be abandoned.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by the combat rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("party of {count} heroes exceeds the maximum of {max}")]
    TooManyHeroes { count: usize, max: usize },

    #[error("character {character} has no ability `{ability}`")]
    AbilityNotFound {
        character: CharacterId,
        ability: String,
    },

    #[error("ability `{ability}` is on cooldown for {remaining} more rounds")]
    OnCooldown { ability: String, remaining: u32 },

    #[error("ability `{ability}` needs a {kind} target but none is available")]
    MissingTarget { ability: String, kind: ContextKind },

    #[error("ability `{ability}` expects a {expected} context, got {found}")]
    ContextMismatch {
        ability: String,
        expected: ContextKind,
        found: ContextKind,
    },

    #[error("character {0} is not part of this combat")]
    CharacterNotFound(CharacterId),

    #[error("character id {id} is used more than once")]
    DuplicateCharacter { id: CharacterId },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TooManyHeroes { .. }
            | Self::AbilityNotFound { .. }
            | Self::MissingTarget { .. }
            | Self::CharacterNotFound(_)
            | Self::DuplicateCharacter { .. } => ErrorSeverity::Validation,
            Self::OnCooldown { .. } | Self::ContextMismatch { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManyHeroes { .. } => "COMBAT_TOO_MANY_HEROES",
            Self::AbilityNotFound { .. } => "COMBAT_ABILITY_NOT_FOUND",
            Self::OnCooldown { .. } => "COMBAT_ON_COOLDOWN",
            Self::MissingTarget { .. } => "COMBAT_MISSING_TARGET",
            Self::ContextMismatch { .. } => "COMBAT_CONTEXT_MISMATCH",
            Self::CharacterNotFound(_) => "COMBAT_CHARACTER_NOT_FOUND",
            Self::DuplicateCharacter { .. } => "COMBAT_DUPLICATE_CHARACTER",
        }
    }
}
