//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine failures and worker coordination failures so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{CombatError, ErrorSeverity, GameError};

use super::handle::MatchId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("match did not finish within {limit} rounds")]
    RoundLimitReached { limit: u32 },

    #[error("match worker command channel closed")]
    MatchClosed,

    #[error("match worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("match worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Combat(err) => err.severity(),
            Self::MatchNotFound(_) | Self::RoundLimitReached { .. } => ErrorSeverity::Validation,
            Self::MatchClosed | Self::ReplyChannelClosed(_) => ErrorSeverity::Internal,
            Self::WorkerJoin(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Combat(err) => err.error_code(),
            Self::MatchNotFound(_) => "RUNTIME_MATCH_NOT_FOUND",
            Self::RoundLimitReached { .. } => "RUNTIME_ROUND_LIMIT_REACHED",
            Self::MatchClosed => "RUNTIME_MATCH_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
        }
    }
}
