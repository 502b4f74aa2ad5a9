//! Deterministic combat rules shared by the runtime, content loaders and tools.
//!
//! `combat-core` defines the canonical rules of a party-versus-boss fight:
//! typed combat contexts, modifiers that rewrite them, cooldown-gated
//! abilities, characters that own their stat mutations, and the round/turn
//! state machine in [`engine::CombatEngine`]. Everything here is synchronous
//! and free of I/O; callers own scheduling and persistence.
pub mod ability;
pub mod character;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod modifier;
pub mod populate;
pub mod stats;

pub use ability::{Ability, Executor, Invocation};
pub use character::{Character, CharacterId};
pub use config::CombatConfig;
pub use context::{Context, ContextKind};
pub use engine::{
    AbilityDisplay, ActionRecord, AttackMarker, CombatEngine, DisplayMarkers, MarkerScheduler,
    MarkerSlot, Phase, RetainMarkers, Side,
};
pub use error::{CombatError, ErrorSeverity, GameError};
pub use modifier::{Effect, Modifier, ModifierType, Trigger};
pub use populate::populate_context;
pub use stats::{CanHeal, CanTakeDamage, Combatant, HasStats, StatDelta, StatKind, Stats};
