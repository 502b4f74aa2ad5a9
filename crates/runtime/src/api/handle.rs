//! Cloneable façade for issuing commands to a match worker.
//!
//! [`MatchHandle`] hides channel plumbing and offers async helpers for
//! stepping a match or streaming events from specific topics.
use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use combat_core::{ActionRecord, Character, CombatEngine};

use super::errors::{Result, RuntimeError};
use super::report::{MatchReport, MatchSnapshot};
use crate::events::{EventBus, MatchEvent, Topic};
use crate::runtime::RuntimeConfig;
use crate::workers::{Command, MatchWorker};

/// Registry-assigned match identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a single [`MatchHandle::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new round opened.
    RoundStarted { round: u32 },
    /// One turn resolved. `None` when the turn was skipped.
    Action(Option<ActionRecord>),
    /// The match is over and no further round was started.
    Finished(MatchReport),
}

/// Client-facing handle to one match
#[derive(Debug, Clone)]
pub struct MatchHandle {
    id: MatchId,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl MatchHandle {
    /// Builds an engine for the roster and spawns its worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        id: MatchId,
        config: &RuntimeConfig,
        heroes: Vec<Character>,
        enemy: Character,
    ) -> Result<(Self, JoinHandle<()>)> {
        let mut engine = config.new_engine();
        engine.initialize(heroes, Some(enemy))?;
        Ok(Self::spawn_engine(id, config, engine))
    }

    /// Spawns a worker that takes exclusive ownership of `engine`.
    pub fn spawn_engine(
        id: MatchId,
        config: &RuntimeConfig,
        engine: CombatEngine,
    ) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let worker = MatchWorker::new(id, engine, command_rx, event_bus.clone(), config.tick_delay);
        let join = tokio::spawn(worker.run());
        (
            Self {
                id,
                command_tx,
                event_bus,
            },
            join,
        )
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Advances the match by one phase transition or one turn.
    ///
    /// Round start and round end open the next round unless the match is
    /// over. The action phase resolves the next turn.
    pub async fn step(&self) -> Result<StepOutcome> {
        self.request(|reply| Command::Step { reply }).await?
    }

    /// Plays the current or next round to its end. Returns the resolved turns.
    pub async fn run_round(&self) -> Result<Vec<ActionRecord>> {
        self.request(|reply| Command::RunRound { reply }).await?
    }

    /// Plays rounds until the match is over.
    ///
    /// Fails with [`RuntimeError::RoundLimitReached`] once `max_rounds` rounds
    /// have been played without an outcome.
    pub async fn run_to_completion(&self, max_rounds: u32) -> Result<MatchReport> {
        self.request(|reply| Command::RunToCompletion { max_rounds, reply })
            .await?
    }

    /// Query the current match state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<MatchSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Stops the worker. Later requests on any clone fail with
    /// [`RuntimeError::MatchClosed`].
    pub async fn close(&self) -> Result<()> {
        self.command_tx
            .send(Command::Close)
            .await
            .map_err(|_| RuntimeError::MatchClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Round` - Round boundaries
    /// - `Topic::Action` - Resolved turns
    /// - `Topic::Outcome` - Match results
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<MatchEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<MatchEvent>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::MatchClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
