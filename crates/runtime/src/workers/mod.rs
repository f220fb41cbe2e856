//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the store and runs actions one at a time;
//! consumer prunes reach it on a side channel.

mod simulation;

pub use simulation::{Command, PruningScheduler, SimulationWorker};
