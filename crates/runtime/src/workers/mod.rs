//! Worker tasks that back the runtime orchestration.
//!
//! Each match worker owns one engine and executes commands in arrival order.
//! Cosmetic marker clears run as detached timer tasks.

mod markers;
mod simulation;

pub use markers::TokioMarkerScheduler;
pub(crate) use simulation::{Command, MatchWorker};
