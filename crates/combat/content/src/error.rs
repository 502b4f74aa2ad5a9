//! Construction-input errors raised while assembling characters and encounters.

use combat_core::{CombatError, ContextKind, ErrorSeverity, Executor, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("unknown ability id `{id}`")]
    UnknownAbility { id: String },

    #[error("ability `{id}` has no executor")]
    MissingExecutor { id: String },

    #[error("ability `{id}` declares {context} contexts but its executor {executor} reads {expected}")]
    ExecutorContextMismatch {
        id: String,
        executor: Executor,
        context: ContextKind,
        expected: ContextKind,
    },

    #[error("duplicate ability id `{id}`")]
    DuplicateAbility { id: String },

    #[error("unknown equipment id {hat_id}")]
    UnknownEquipment { hat_id: u32 },

    #[error("duplicate equipment id {hat_id}")]
    DuplicateEquipment { hat_id: u32 },

    #[error("unknown character type `{name}`")]
    UnknownCharacterType { name: String },

    #[error("character `{id}` has neither stats nor a character type")]
    MissingStats { id: String },

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Combat(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAbility { .. } => "CONTENT_UNKNOWN_ABILITY",
            Self::MissingExecutor { .. } => "CONTENT_MISSING_EXECUTOR",
            Self::ExecutorContextMismatch { .. } => "CONTENT_EXECUTOR_CONTEXT_MISMATCH",
            Self::DuplicateAbility { .. } => "CONTENT_DUPLICATE_ABILITY",
            Self::UnknownEquipment { .. } => "CONTENT_UNKNOWN_EQUIPMENT",
            Self::DuplicateEquipment { .. } => "CONTENT_DUPLICATE_EQUIPMENT",
            Self::UnknownCharacterType { .. } => "CONTENT_UNKNOWN_CHARACTER_TYPE",
            Self::MissingStats { .. } => "CONTENT_MISSING_STATS",
            Self::Combat(err) => err.error_code(),
        }
    }
}
