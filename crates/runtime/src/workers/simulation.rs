//! Match worker that owns the authoritative [`CombatEngine`].
//!
//! Receives commands from [`MatchHandle`](crate::MatchHandle), drives the
//! engine, and publishes progress to the [`EventBus`].

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use combat_core::{ActionRecord, CombatEngine, Phase};

use crate::api::{MatchId, MatchReport, MatchSnapshot, Result, RuntimeError, StepOutcome};
use crate::events::{EventBus, MatchEvent};

/// Commands that can be sent to a match worker
pub enum Command {
    Step {
        reply: oneshot::Sender<Result<StepOutcome>>,
    },
    RunRound {
        reply: oneshot::Sender<Result<Vec<ActionRecord>>>,
    },
    RunToCompletion {
        max_rounds: u32,
        reply: oneshot::Sender<Result<MatchReport>>,
    },
    /// Query the current match state (read-only).
    Snapshot {
        reply: oneshot::Sender<MatchSnapshot>,
    },
    Close,
}

/// Background task that processes commands for one match.
pub struct MatchWorker {
    id: MatchId,
    engine: CombatEngine,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_delay: Duration,
    finished: bool,
}

impl MatchWorker {
    pub fn new(
        id: MatchId,
        engine: CombatEngine,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_delay: Duration,
    ) -> Self {
        info!(
            target: "combat::runtime",
            match_id = %id,
            heroes = engine.heroes().len(),
            "match worker started"
        );

        Self {
            id,
            engine,
            command_rx,
            event_bus,
            tick_delay,
            finished: false,
        }
    }

    /// Main worker loop. Ends on [`Command::Close`] or when every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            if !self.handle_command(cmd).await {
                break;
            }
        }
        debug!(target: "combat::runtime", match_id = %self.id, "match worker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Step { reply } => {
                let result = self.step();
                if reply.send(result).is_err() {
                    debug!("Step reply channel closed (caller dropped)");
                }
            }
            Command::RunRound { reply } => {
                let result = self.run_round().await;
                if reply.send(result).is_err() {
                    debug!("RunRound reply channel closed (caller dropped)");
                }
            }
            Command::RunToCompletion { max_rounds, reply } => {
                let result = self.run_to_completion(max_rounds).await;
                if reply.send(result).is_err() {
                    debug!("RunToCompletion reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply
                    .send(MatchSnapshot::capture(self.id, &self.engine))
                    .is_err()
                {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Close => return false,
        }
        true
    }

    fn step(&mut self) -> Result<StepOutcome> {
        match self.engine.phase() {
            Phase::Action => {
                let record = self.engine.process_next_action()?;
                if let Some(record) = &record {
                    self.event_bus.publish(MatchEvent::ActionResolved {
                        match_id: self.id,
                        round: self.engine.round(),
                        record: record.clone(),
                    });
                }
                if self.engine.phase() == Phase::RoundEnd {
                    self.event_bus.publish(MatchEvent::RoundEnded {
                        match_id: self.id,
                        round: self.engine.round(),
                        game_over: self.engine.is_game_over(),
                    });
                }
                Ok(StepOutcome::Action(record))
            }
            Phase::RoundStart | Phase::RoundEnd => {
                if self.engine.is_game_over() {
                    return Ok(StepOutcome::Finished(self.finish()));
                }
                self.engine.start_round();
                let round = self.engine.round();
                self.event_bus.publish(MatchEvent::RoundStarted {
                    match_id: self.id,
                    round,
                });
                Ok(StepOutcome::RoundStarted { round })
            }
        }
    }

    async fn run_round(&mut self) -> Result<Vec<ActionRecord>> {
        let mut records = Vec::new();
        if self.engine.phase() != Phase::Action
            && let StepOutcome::Finished(_) = self.step()?
        {
            return Ok(records);
        }

        while self.engine.phase() == Phase::Action {
            if !self.tick_delay.is_zero() {
                tokio::time::sleep(self.tick_delay).await;
            }
            if let StepOutcome::Action(Some(record)) = self.step()? {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn run_to_completion(&mut self, max_rounds: u32) -> Result<MatchReport> {
        loop {
            if self.engine.phase() != Phase::Action {
                if self.engine.is_game_over() {
                    return Ok(self.finish());
                }
                if self.engine.round() >= max_rounds {
                    return Err(RuntimeError::RoundLimitReached { limit: max_rounds });
                }
            }
            self.run_round().await?;
        }
    }

    /// Captures the report and publishes it the first time the match ends.
    fn finish(&mut self) -> MatchReport {
        let report = MatchReport::capture(self.id, &self.engine);
        if !self.finished {
            self.finished = true;
            info!(
                target: "combat::runtime",
                match_id = %self.id,
                victory = report.victory,
                rounds = report.rounds,
                "match finished"
            );
            self.event_bus.publish(MatchEvent::MatchFinished {
                match_id: self.id,
                report: report.clone(),
            });
        }
        report
    }
}
