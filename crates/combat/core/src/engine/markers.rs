//! Cosmetic "who is attacking" / "what was used" markers.
//!
//! Markers are side-channel presentation state. Gameplay never reads them.
//! Each write bumps a generation so a delayed clear only removes the marker it
//! was scheduled for.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::character::CharacterId;

/// Runs a fire-and-forget task after a delay. Cancellation is not supported.
pub trait MarkerScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send + 'static>);
}

/// Scheduler that never runs clears: markers stay until overwritten.
#[derive(Clone, Copy, Debug, Default)]
pub struct RetainMarkers;

impl MarkerScheduler for RetainMarkers {
    fn schedule(&self, _delay: Duration, _task: Box<dyn FnOnce() + Send + 'static>) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackMarker {
    pub attacker_id: CharacterId,
    pub target_id: CharacterId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDisplay {
    pub character_id: CharacterId,
    pub ability_id: String,
    pub ability_name: String,
}

#[derive(Debug)]
struct SlotState<T> {
    generation: u64,
    value: Option<T>,
}

/// Shared, generation-checked marker cell.
#[derive(Debug)]
pub struct MarkerSlot<T> {
    inner: Arc<Mutex<SlotState<T>>>,
}

impl<T> Clone for MarkerSlot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for MarkerSlot<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotState {
                generation: 0,
                value: None,
            })),
        }
    }
}

impl<T: Clone> MarkerSlot<T> {
    /// Replaces the marker and returns the new generation.
    pub fn set(&self, value: T) -> u64 {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.value = Some(value);
        state.generation
    }

    /// Clears the marker only if nothing newer was written since `generation`.
    pub fn clear_if(&self, generation: u64) -> bool {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            return false;
        }
        state.value = None;
        true
    }

    pub fn clear(&self) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.value = None;
    }

    pub fn get(&self) -> Option<T> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .clone()
    }
}

/// The two display fields an engine exposes, plus the scheduler clearing them.
#[derive(Clone)]
pub struct DisplayMarkers {
    attack: MarkerSlot<AttackMarker>,
    ability: MarkerSlot<AbilityDisplay>,
    scheduler: Arc<dyn MarkerScheduler>,
    lifetime: Duration,
}

impl DisplayMarkers {
    pub fn new(scheduler: Arc<dyn MarkerScheduler>, lifetime: Duration) -> Self {
        Self {
            attack: MarkerSlot::default(),
            ability: MarkerSlot::default(),
            scheduler,
            lifetime,
        }
    }

    pub fn attack(&self) -> Option<AttackMarker> {
        self.attack.get()
    }

    pub fn ability(&self) -> Option<AbilityDisplay> {
        self.ability.get()
    }

    pub fn show_attack(&self, marker: AttackMarker) {
        Self::show(&self.attack, marker, self.scheduler.as_ref(), self.lifetime);
    }

    pub fn show_ability(&self, display: AbilityDisplay) {
        Self::show(&self.ability, display, self.scheduler.as_ref(), self.lifetime);
    }

    pub fn clear(&self) {
        self.attack.clear();
        self.ability.clear();
    }

    fn show<T: Clone + Send + 'static>(
        slot: &MarkerSlot<T>,
        value: T,
        scheduler: &dyn MarkerScheduler,
        lifetime: Duration,
    ) {
        let generation = slot.set(value);
        let slot = slot.clone();
        scheduler.schedule(
            lifetime,
            Box::new(move || {
                slot.clear_if(generation);
            }),
        );
    }
}

impl Default for DisplayMarkers {
    fn default() -> Self {
        Self::new(Arc::new(RetainMarkers), Duration::ZERO)
    }
}

impl std::fmt::Debug for DisplayMarkers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayMarkers")
            .field("attack", &self.attack())
            .field("ability", &self.ability())
            .field("lifetime", &self.lifetime)
            .finish()
    }
}
