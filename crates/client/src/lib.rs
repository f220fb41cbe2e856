//! Text client for the arena runtime.
//!
//! The `arena` binary is the composition root: it loads configuration,
//! starts a [`runtime::Runtime`], feeds it a scenario and plays the role of
//! the renderer by pruning every effect once its animation would be over.
pub mod config;
pub mod consumer;
pub mod logging;
pub mod render;

pub use config::ClientConfig;
pub use consumer::EffectConsumer;
