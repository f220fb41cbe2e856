//! Explicit change notification for the store.
//!
//! Every store mutation emits exactly one [`StoreChange`] to each registered
//! listener, synchronously and in mutation order.
use std::fmt;

use super::{EffectRef, PlayerId};

/// Which field of a ledger entry a mutator touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerField {
    Position,
    Points,
    Range,
    Hearts,
}

/// A single mutation of the store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoreChange {
    /// A player was inserted or overwritten.
    PlayerAdded(PlayerId),
    PlayerUpdated { id: PlayerId, field: PlayerField },
    EffectAdded(EffectRef),
    EffectRemoved(EffectRef),
    LogAppended(String),
    /// Every collection was cleared.
    Reset,
}

/// Handle returned by [`GameStore::subscribe`](super::GameStore::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&StoreChange) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&self, change: &StoreChange) {
        for (_, listener) in &self.entries {
            listener(change);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
