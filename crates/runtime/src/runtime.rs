//! Match registry and runtime configuration.
//!
//! The registry assigns match ids, spawns one worker per match, and hands out
//! cloneable [`MatchHandle`]s. Matches never share state.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use combat_core::{Character, CombatConfig, CombatEngine};

use crate::api::{MatchHandle, MatchId, Result, RuntimeError};
use crate::workers::TokioMarkerScheduler;

/// Runtime configuration shared across the registry and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Pause between turns while running whole rounds.
    pub tick_delay: Duration,
    /// Round limit used by callers that run matches to completion.
    pub max_rounds: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_delay: Duration::ZERO,
            max_rounds: 100,
        }
    }
}

impl RuntimeConfig {
    /// An empty engine whose markers clear on the current tokio runtime.
    ///
    /// Outside a runtime the markers are retained until overwritten.
    pub fn new_engine(&self) -> CombatEngine {
        match TokioMarkerScheduler::current() {
            Some(scheduler) => {
                CombatEngine::with_scheduler(self.combat.clone(), Arc::new(scheduler))
            }
            None => CombatEngine::new(self.combat.clone()),
        }
    }
}

struct MatchEntry {
    handle: MatchHandle,
    worker: JoinHandle<()>,
}

/// Concurrent matches keyed by [`MatchId`].
pub struct MatchRegistry {
    config: RuntimeConfig,
    next_id: AtomicU64,
    matches: RwLock<HashMap<MatchId, MatchEntry>>,
}

impl MatchRegistry {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            next_id: AtomicU64::new(1),
            matches: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Starts a match for the given roster.
    pub async fn create(&self, heroes: Vec<Character>, enemy: Character) -> Result<MatchHandle> {
        let id = self.allocate_id();
        let (handle, worker) = MatchHandle::spawn(id, &self.config, heroes, enemy)?;
        Ok(self.insert(handle, worker).await)
    }

    /// Starts a match for an engine the caller already initialized.
    pub async fn adopt(&self, engine: CombatEngine) -> MatchHandle {
        let id = self.allocate_id();
        let (handle, worker) = MatchHandle::spawn_engine(id, &self.config, engine);
        self.insert(handle, worker).await
    }

    pub async fn get(&self, id: MatchId) -> Result<MatchHandle> {
        self.matches
            .read()
            .await
            .get(&id)
            .map(|entry| entry.handle.clone())
            .ok_or(RuntimeError::MatchNotFound(id))
    }

    /// Ids of every open match, in ascending order.
    pub async fn ids(&self) -> Vec<MatchId> {
        let mut ids: Vec<_> = self.matches.read().await.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub async fn len(&self) -> usize {
        self.matches.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.matches.read().await.is_empty()
    }

    /// Stops a match worker and waits for it to exit.
    pub async fn close(&self, id: MatchId) -> Result<()> {
        let entry = self
            .matches
            .write()
            .await
            .remove(&id)
            .ok_or(RuntimeError::MatchNotFound(id))?;
        Self::stop(entry).await?;
        info!(target: "combat::runtime", match_id = %id, "match closed");
        Ok(())
    }

    /// Closes every open match.
    pub async fn shutdown(&self) -> Result<()> {
        let entries: Vec<_> = self.matches.write().await.drain().map(|(_, e)| e).collect();
        for entry in entries {
            Self::stop(entry).await?;
        }
        Ok(())
    }

    fn allocate_id(&self) -> MatchId {
        MatchId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    async fn insert(&self, handle: MatchHandle, worker: JoinHandle<()>) -> MatchHandle {
        let id = handle.id();
        self.matches.write().await.insert(
            id,
            MatchEntry {
                handle: handle.clone(),
                worker,
            },
        );
        info!(target: "combat::runtime", match_id = %id, "match registered");
        handle
    }

    async fn stop(entry: MatchEntry) -> Result<()> {
        if let Err(err) = entry.handle.close().await {
            warn!(
                target: "combat::runtime",
                match_id = %entry.handle.id(),
                error = %err,
                "close command not delivered, worker already stopped"
            );
        }
        entry.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}
