//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command, prune and event
//! channels, and exposes a builder-based API for clients to drive actions.

use std::str::FromStr;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::warn;

use game_core::{GameConfig, GameStore, ResourcePolicy};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    pub const ENV_ANIMATION_SPEED: &'static str = "ARENA_ANIMATION_SPEED";
    pub const ENV_STRICT_RESOURCES: &'static str = "ARENA_STRICT_RESOURCES";
    pub const ENV_EVENT_BUFFER: &'static str = "ARENA_EVENT_BUFFER";
    pub const ENV_COMMAND_BUFFER: &'static str = "ARENA_COMMAND_BUFFER";

    /// Defaults overridden by whichever `ARENA_*` variables are set.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(speed) = read_env::<f32>(Self::ENV_ANIMATION_SPEED) {
            config.game_config.timing.speed = speed;
        }
        if let Some(strict) = read_env::<Flag>(Self::ENV_STRICT_RESOURCES) {
            config.game_config.resource_policy = if strict.0 {
                ResourcePolicy::Strict
            } else {
                ResourcePolicy::Permissive
            };
        }
        if let Some(size) = read_env::<usize>(Self::ENV_EVENT_BUFFER).filter(|&n| n > 0) {
            config.event_buffer_size = size;
        }
        if let Some(size) = read_env::<usize>(Self::ENV_COMMAND_BUFFER).filter(|&n| n > 0) {
            config.command_buffer_size = size;
        }

        config
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(target: "runtime::config", key, value = %raw, "ignoring unparsable variable");
            None
        }
    }
}

/// Boolean env value accepting `1/0`, `true/false`, `yes/no`, `on/off`.
struct Flag(bool);

impl FromStr for Flag {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Flag(true)),
            "0" | "false" | "no" | "off" => Ok(Flag(false)),
            _ => Err(()),
        }
    }
}

/// Main runtime that owns the simulation worker
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle clone has been dropped; commands
    /// already queued still run.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    store: Option<GameStore>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            store: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the game rules configuration
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    /// Provide the initial store. Defaults to an empty one.
    pub fn initial_store(mut self, store: GameStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the runtime and spawn its worker
    ///
    /// Must be called from within a tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let store = self.store.unwrap_or_default();

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (prune_tx, prune_rx) = mpsc::unbounded_channel();
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, prune_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            store,
            self.config.game_config,
            command_rx,
            prune_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
