//! Async match driver for the combat engine.
//!
//! Each match runs on its own worker task that exclusively owns a
//! [`combat_core::CombatEngine`]. Clients drive it through a cloneable
//! [`MatchHandle`], subscribe to match events, and keep many concurrent
//! matches in a [`MatchRegistry`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the registry and its configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    CharacterSummary, MatchHandle, MatchId, MatchReport, MatchSnapshot, Result, RuntimeError,
    StepOutcome,
};
pub use events::{EventBus, MatchEvent, Topic};
pub use runtime::{MatchRegistry, RuntimeConfig};
pub use workers::TokioMarkerScheduler;
