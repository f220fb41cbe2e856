//! Topic-based event bus for runtime events.
//!
//! Store changes and action progress are published on separate topics so a
//! renderer can follow the effect queues without decoding action traffic.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::ActionEvent;
