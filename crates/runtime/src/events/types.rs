use serde::{Deserialize, Serialize};

use combat_core::ActionRecord;

use super::bus::Topic;
use crate::api::{MatchId, MatchReport};

/// Progress notifications published by a match worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    RoundStarted {
        match_id: MatchId,
        round: u32,
    },
    ActionResolved {
        match_id: MatchId,
        round: u32,
        record: ActionRecord,
    },
    RoundEnded {
        match_id: MatchId,
        round: u32,
        game_over: bool,
    },
    /// Published once per match.
    MatchFinished {
        match_id: MatchId,
        report: MatchReport,
    },
}

impl MatchEvent {
    pub fn topic(&self) -> Topic {
        match self {
            Self::RoundStarted { .. } | Self::RoundEnded { .. } => Topic::Round,
            Self::ActionResolved { .. } => Topic::Action,
            Self::MatchFinished { .. } => Topic::Outcome,
        }
    }

    pub fn match_id(&self) -> MatchId {
        match self {
            Self::RoundStarted { match_id, .. }
            | Self::ActionResolved { match_id, .. }
            | Self::RoundEnded { match_id, .. }
            | Self::MatchFinished { match_id, .. } => *match_id,
        }
    }
}
