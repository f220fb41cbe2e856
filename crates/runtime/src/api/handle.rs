//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! running actions, pruning rendered effects or streaming events from
//! specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Action, ActionKind, EffectRef, GameState, StoreSnapshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    prune_tx: mpsc::UnboundedSender<EffectRef>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        prune_tx: mpsc::UnboundedSender<EffectRef>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            command_tx,
            prune_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Runs `action` through begin, execute and commit.
    ///
    /// Resolves once the action committed or failed. Actions sent from
    /// several tasks are still applied one after another.
    pub async fn execute_action(&self, action: Action) -> Result<ActionKind> {
        self.request(|reply| Command::Execute { action, reply })
            .await?
    }

    /// Queues removal of a rendered effect.
    ///
    /// The worker applies it between actions or while an animation is
    /// paused, never in the middle of a step. Unknown effects are ignored.
    pub fn prune(&self, effect: EffectRef) -> Result<()> {
        self.prune_tx
            .send(effect)
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Store` - Every store mutation, effect queues included
    /// - `Topic::Action` - Action begun, committed and failed
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut store_rx = handle.subscribe(Topic::Store);
    /// while let Ok(event) = store_rx.recv().await {
    ///     // Render effects
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Query the player ledger (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Query everything the store holds, pending effects included
    pub async fn query_snapshot(&self) -> Result<StoreSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Clears the store. Runs after any action already queued.
    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Command::Reset { reply }).await
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
