//! Runtime orchestration for the staged action engine.
//!
//! This crate layers pacing, animation and observability on top of the pure
//! rules in `game-core`. Consumers embed [`Runtime`] to run actions against a
//! single authoritative store, subscribe to store changes and prune rendered
//! effects through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`executor`] implements the begin/execute/commit executors
//! - [`scheduler`] injects the pauses between animation steps
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`scenario`] scripts action sequences and loads them from files
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod executor;
pub mod runtime;
pub mod scenario;
pub mod scheduler;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{ActionEvent, Event, EventBus, Topic};
pub use executor::{
    ActionExecutor, Animate, Executor, ExecutorState, FireExecutor, InvestExecutor,
    LifecycleError, MoveExecutor, ShareExecutor, SpawnExecutor, StagedExecutor, drive, run,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scenario::{Scenario, ScenarioDriver, ScenarioStep};
pub use scheduler::{ImmediateScheduler, Scheduler, TokioScheduler};
pub use workers::PruningScheduler;
