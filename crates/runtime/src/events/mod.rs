//! Topic-based event routing for match progress.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::MatchEvent;
