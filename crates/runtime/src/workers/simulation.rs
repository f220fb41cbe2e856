//! Simulation worker that owns the authoritative [`GameStore`].
//!
//! Receives commands from [`RuntimeHandle`](crate::api::RuntimeHandle), runs
//! each action through its staged executor and publishes store changes and
//! action progress to the [`EventBus`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc, oneshot};

use game_core::{
    Action, ActionKind, EffectRef, GameConfig, GameState, GameStore, StoreChange, StoreSnapshot,
};
use tracing::{debug, error, info};

use crate::api::Result;
use crate::events::{ActionEvent, Event, EventBus};
use crate::executor::{ActionExecutor, Executor};
use crate::scheduler::Scheduler;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Run one action to completion (begin, execute, commit).
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ActionKind>>,
    },
    /// Query the player ledger (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Query the full store contents, effect queues included.
    QuerySnapshot {
        reply: oneshot::Sender<StoreSnapshot>,
    },
    /// Clear the store.
    Reset { reply: oneshot::Sender<()> },
}

/// Worker-side pacing: sleeps like [`TokioScheduler`](crate::scheduler::TokioScheduler)
/// but applies queued prune requests while it waits.
pub struct PruningScheduler {
    prunes: Mutex<mpsc::UnboundedReceiver<EffectRef>>,
}

impl PruningScheduler {
    pub fn new(prunes: mpsc::UnboundedReceiver<EffectRef>) -> Self {
        Self {
            prunes: Mutex::new(prunes),
        }
    }
}

#[async_trait]
impl Scheduler for PruningScheduler {
    async fn pause(&self, store: &mut GameStore, duration: Duration) {
        let mut prunes = self.prunes.lock().await;
        let sleep = tokio::time::sleep(duration);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => break,
                Some(effect) = prunes.recv() => apply_prune(store, effect),
            }
        }
        while let Ok(effect) = prunes.try_recv() {
            apply_prune(store, effect);
        }
    }
}

fn apply_prune(store: &mut GameStore, effect: EffectRef) {
    if !store.remove_effect(effect) {
        debug!(target: "runtime::worker", %effect, "prune of unknown effect ignored");
    }
}

enum Next {
    Command(Command),
    Prune(EffectRef),
    Closed,
}

/// Background task that processes gameplay commands.
///
/// Commands run strictly in arrival order: the next action never begins
/// before the previous one committed or failed.
pub struct SimulationWorker {
    store: GameStore,
    config: GameConfig,
    command_rx: mpsc::Receiver<Command>,
    scheduler: PruningScheduler,
    event_bus: EventBus,
    seq: u64,
}

impl SimulationWorker {
    /// Creates a new simulation worker and bridges store changes onto the bus.
    pub fn new(
        mut store: GameStore,
        config: GameConfig,
        command_rx: mpsc::Receiver<Command>,
        prune_rx: mpsc::UnboundedReceiver<EffectRef>,
        event_bus: EventBus,
    ) -> Self {
        let bus = event_bus.clone();
        store.subscribe(move |change| {
            if let StoreChange::LogAppended(line) = change {
                debug!(target: "runtime::store", "{line}");
            }
            bus.publish(Event::Store(change.clone()));
        });

        info!(
            target: "runtime::worker",
            players = store.players().len(),
            policy = ?config.resource_policy,
            "SimulationWorker initialized"
        );

        Self {
            store,
            config,
            command_rx,
            scheduler: PruningScheduler::new(prune_rx),
            event_bus,
            seq: 0,
        }
    }

    /// Main worker loop. Ends once every command sender is dropped.
    pub async fn run(mut self) {
        loop {
            let next = {
                let mut prunes = self.scheduler.prunes.lock().await;
                tokio::select! {
                    command = self.command_rx.recv() => match command {
                        Some(command) => Next::Command(command),
                        None => Next::Closed,
                    },
                    Some(effect) = prunes.recv() => Next::Prune(effect),
                }
            };

            match next {
                Next::Command(command) => self.handle_command(command).await,
                Next::Prune(effect) => apply_prune(&mut self.store, effect),
                Next::Closed => break,
            }
        }
        debug!(target: "runtime::worker", "command channel closed, worker exiting");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Execute { action, reply } => {
                let result = self.handle_action(action).await;
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.store.state()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.store.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                self.store.reset();
                info!(target: "runtime::worker", "store reset");
                if reply.send(()).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs one action and publishes its outcome on the action topic.
    async fn handle_action(&mut self, action: Action) -> Result<ActionKind> {
        self.seq += 1;
        let seq = self.seq;
        let kind = action.kind();

        let result = self.run_staged(seq, action).await;
        match &result {
            Ok(_) => {
                self.event_bus
                    .publish(Event::Action(ActionEvent::Committed { seq, kind }));
            }
            Err(error) => {
                error!(target: "runtime::worker", seq, %kind, %error, "action failed");
                self.event_bus.publish(Event::Action(ActionEvent::Failed {
                    seq,
                    kind,
                    error: error.to_string(),
                }));
            }
        }
        result
    }

    async fn run_staged(&mut self, seq: u64, action: Action) -> Result<ActionKind> {
        let mut executor = ActionExecutor::new(action.clone(), &self.config)?;

        executor.begin(&mut self.store)?;
        self.event_bus
            .publish(Event::Action(ActionEvent::Begun { seq, action }));

        executor.execute(&mut self.store, &self.scheduler).await?;
        executor.commit(&mut self.store)?;
        Ok(executor.kind())
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Coordinates, EffectId};

    use super::*;

    #[tokio::test]
    async fn pause_applies_queued_prunes() {
        let (prune_tx, prune_rx) = mpsc::unbounded_channel();
        let scheduler = PruningScheduler::new(prune_rx);
        let mut store = GameStore::new();
        let first = store.add_appear_point(Coordinates::new(1, 1), 0);
        let second = store.add_appear_point(Coordinates::new(2, 2), 0);

        prune_tx.send(EffectRef::Appear(first)).unwrap();
        prune_tx.send(EffectRef::Appear(EffectId(99))).unwrap();
        scheduler.pause(&mut store, Duration::ZERO).await;

        assert_eq!(store.appear_points().len(), 1);
        assert_eq!(store.appear_points()[0].id, second);
    }

    #[tokio::test]
    async fn pause_survives_closed_prune_channel() {
        let (prune_tx, prune_rx) = mpsc::unbounded_channel::<EffectRef>();
        drop(prune_tx);
        let scheduler = PruningScheduler::new(prune_rx);
        let mut store = GameStore::new();

        scheduler
            .pause(&mut store, Duration::from_millis(5))
            .await;

        assert_eq!(store.pending_effects(), 0);
    }
}
