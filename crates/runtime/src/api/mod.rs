//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration or workers.

pub mod errors;
pub mod handle;
pub mod report;

pub use errors::{Result, RuntimeError};
pub use handle::{MatchHandle, MatchId, StepOutcome};
pub use report::{CharacterSummary, MatchReport, MatchSnapshot};
