//! The authoritative ledger of players and ephemeral effect queues.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::observer::{ListenerId, Listeners, PlayerField, StoreChange};
use super::{
    AppearPoint, Coordinates, DissolveHeart, DissolvePoint, EffectId, EffectRef, FloatingPoint,
    PlayerData, PlayerId, StoreError, TracePath, UnattachedPoint,
};

/// Read-only projection handed to renderers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub players: BTreeMap<PlayerId, PlayerData>,
}

impl GameState {
    pub fn player(&self, id: &str) -> Option<&PlayerData> {
        self.players.get(id)
    }
}

/// Cloned view of everything the store holds, effects included.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreSnapshot {
    pub log: Vec<String>,
    pub players: BTreeMap<PlayerId, PlayerData>,
    pub floating_points: Vec<FloatingPoint>,
    pub dissolve_points: Vec<DissolvePoint>,
    pub appear_points: Vec<AppearPoint>,
    pub dissolve_hearts: Vec<DissolveHeart>,
    pub tracings: Vec<TracePath>,
}

impl StoreSnapshot {
    /// Number of effects the consumer has not pruned yet.
    pub fn pending_effects(&self) -> usize {
        self.floating_points.len()
            + self.dissolve_points.len()
            + self.appear_points.len()
            + self.dissolve_hearts.len()
            + self.tracings.len()
    }

    /// References to every pending effect, queue by queue in append order.
    pub fn effect_refs(&self) -> Vec<EffectRef> {
        let mut refs = Vec::with_capacity(self.pending_effects());
        refs.extend(
            self.floating_points
                .iter()
                .map(|e| EffectRef::Floating(e.id)),
        );
        refs.extend(
            self.dissolve_points
                .iter()
                .map(|e| EffectRef::Dissolve(e.id)),
        );
        refs.extend(self.appear_points.iter().map(|e| EffectRef::Appear(e.id)));
        refs.extend(self.dissolve_hearts.iter().map(|e| EffectRef::Heart(e.id)));
        refs.extend(self.tracings.iter().map(|e| EffectRef::Trace(e.id)));
        refs
    }
}

/// Single source of truth for the player ledger and the effect queues.
///
/// All mutation goes through named methods so that every change is observed
/// by the registered listeners. Effect queues are append-only from the
/// executor side; entries leave only through the `remove_*` methods, which
/// belong to the consumer that renders them.
#[derive(Debug, Default)]
pub struct GameStore {
    log: Vec<String>,
    players: BTreeMap<PlayerId, PlayerData>,
    floating_points: Vec<FloatingPoint>,
    dissolve_points: Vec<DissolvePoint>,
    appear_points: Vec<AppearPoint>,
    dissolve_hearts: Vec<DissolveHeart>,
    tracings: Vec<TracePath>,
    // Not cleared by reset so ids stay unique for the whole session.
    next_effect_id: u64,
    listeners: Listeners,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== observation =====

    /// Registers a listener that receives every subsequent change.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&self, change: StoreChange) {
        self.listeners.notify(&change);
    }

    // ===== read access =====

    /// Read-only projection of the ledger.
    pub fn state(&self) -> GameState {
        GameState {
            players: self.players.clone(),
        }
    }

    /// Clones the complete store contents.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            log: self.log.clone(),
            players: self.players.clone(),
            floating_points: self.floating_points.clone(),
            dissolve_points: self.dissolve_points.clone(),
            appear_points: self.appear_points.clone(),
            dissolve_hearts: self.dissolve_hearts.clone(),
            tracings: self.tracings.clone(),
        }
    }

    pub fn player(&self, id: &str) -> Option<&PlayerData> {
        self.players.get(id)
    }

    /// Like [`player`](Self::player) but fails with `UnknownPlayer`.
    pub fn require_player(&self, id: &PlayerId) -> Result<&PlayerData, StoreError> {
        self.players
            .get(id)
            .ok_or_else(|| StoreError::UnknownPlayer { id: id.clone() })
    }

    pub fn players(&self) -> &BTreeMap<PlayerId, PlayerData> {
        &self.players
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn floating_points(&self) -> &[FloatingPoint] {
        &self.floating_points
    }

    pub fn dissolve_points(&self) -> &[DissolvePoint] {
        &self.dissolve_points
    }

    pub fn appear_points(&self) -> &[AppearPoint] {
        &self.appear_points
    }

    pub fn dissolve_hearts(&self) -> &[DissolveHeart] {
        &self.dissolve_hearts
    }

    pub fn tracings(&self) -> &[TracePath] {
        &self.tracings
    }

    /// Number of effects not yet removed by the consumer.
    pub fn pending_effects(&self) -> usize {
        self.floating_points.len()
            + self.dissolve_points.len()
            + self.appear_points.len()
            + self.dissolve_hearts.len()
            + self.tracings.len()
    }

    // ===== lifecycle =====

    /// Clears every collection back to empty. There is no partial reset.
    pub fn reset(&mut self) {
        self.log.clear();
        self.players.clear();
        self.floating_points.clear();
        self.dissolve_points.clear();
        self.appear_points.clear();
        self.dissolve_hearts.clear();
        self.tracings.clear();
        self.emit(StoreChange::Reset);
    }

    pub fn add_log(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        self.log.push(msg.clone());
        self.emit(StoreChange::LogAppended(msg));
    }

    // ===== player ledger =====

    /// Inserts or overwrites the player keyed by `data.name`.
    pub fn add_player(&mut self, data: PlayerData) {
        let id = data.name.clone();
        self.players.insert(id.clone(), data);
        self.emit(StoreChange::PlayerAdded(id));
    }

    pub fn set_player_position(
        &mut self,
        who: &PlayerId,
        position: Coordinates,
    ) -> Result<(), StoreError> {
        self.update_player(who, PlayerField::Position, |p| p.position = position)
    }

    pub fn set_player_points(&mut self, who: &PlayerId, points: i64) -> Result<(), StoreError> {
        self.update_player(who, PlayerField::Points, |p| p.points = points)
    }

    pub fn set_player_range(&mut self, who: &PlayerId, range: i64) -> Result<(), StoreError> {
        self.update_player(who, PlayerField::Range, |p| p.range = range)
    }

    pub fn set_player_hearts(&mut self, who: &PlayerId, hearts: i64) -> Result<(), StoreError> {
        self.update_player(who, PlayerField::Hearts, |p| p.hearts = hearts)
    }

    fn update_player(
        &mut self,
        who: &PlayerId,
        field: PlayerField,
        update: impl FnOnce(&mut PlayerData),
    ) -> Result<(), StoreError> {
        let player = self
            .players
            .get_mut(who)
            .ok_or_else(|| StoreError::UnknownPlayer { id: who.clone() })?;
        update(player);
        self.emit(StoreChange::PlayerUpdated {
            id: who.clone(),
            field,
        });
        Ok(())
    }

    // ===== effect producers =====

    fn allocate_effect_id(&mut self) -> EffectId {
        let id = EffectId(self.next_effect_id);
        self.next_effect_id += 1;
        id
    }

    pub fn add_floating_point(&mut self, from: UnattachedPoint, to: UnattachedPoint) -> EffectId {
        let id = self.allocate_effect_id();
        self.floating_points.push(FloatingPoint { id, from, to });
        self.emit(StoreChange::EffectAdded(EffectRef::Floating(id)));
        id
    }

    pub fn add_dissolve_point(&mut self, at: Coordinates, height: i64) -> EffectId {
        let id = self.allocate_effect_id();
        self.dissolve_points.push(DissolvePoint {
            id,
            point: UnattachedPoint::new(at, height),
        });
        self.emit(StoreChange::EffectAdded(EffectRef::Dissolve(id)));
        id
    }

    pub fn add_appear_point(&mut self, at: Coordinates, height: i64) -> EffectId {
        let id = self.allocate_effect_id();
        self.appear_points.push(AppearPoint {
            id,
            point: UnattachedPoint::new(at, height),
        });
        self.emit(StoreChange::EffectAdded(EffectRef::Appear(id)));
        id
    }

    pub fn add_dissolve_heart(&mut self, owner: PlayerId) -> EffectId {
        let id = self.allocate_effect_id();
        self.dissolve_hearts.push(DissolveHeart { id, owner });
        self.emit(StoreChange::EffectAdded(EffectRef::Heart(id)));
        id
    }

    /// Adds a trace between two players, copying their current positions.
    pub fn add_trace_path(
        &mut self,
        from: &PlayerId,
        to: &PlayerId,
        power: f32,
    ) -> Result<Uuid, StoreError> {
        let from = self.require_player(from)?.position;
        let to = self.require_player(to)?.position;
        let id = Uuid::new_v4();
        self.tracings.push(TracePath {
            id,
            from,
            to,
            power,
        });
        self.emit(StoreChange::EffectAdded(EffectRef::Trace(id)));
        Ok(id)
    }

    // ===== consumer pruning =====

    pub fn remove_floating_point(&mut self, id: EffectId) -> Option<FloatingPoint> {
        let index = self.floating_points.iter().position(|e| e.id == id)?;
        let removed = self.floating_points.remove(index);
        self.emit(StoreChange::EffectRemoved(EffectRef::Floating(id)));
        Some(removed)
    }

    pub fn remove_dissolve_point(&mut self, id: EffectId) -> Option<DissolvePoint> {
        let index = self.dissolve_points.iter().position(|e| e.id == id)?;
        let removed = self.dissolve_points.remove(index);
        self.emit(StoreChange::EffectRemoved(EffectRef::Dissolve(id)));
        Some(removed)
    }

    pub fn remove_appear_point(&mut self, id: EffectId) -> Option<AppearPoint> {
        let index = self.appear_points.iter().position(|e| e.id == id)?;
        let removed = self.appear_points.remove(index);
        self.emit(StoreChange::EffectRemoved(EffectRef::Appear(id)));
        Some(removed)
    }

    pub fn remove_dissolve_heart(&mut self, id: EffectId) -> Option<DissolveHeart> {
        let index = self.dissolve_hearts.iter().position(|e| e.id == id)?;
        let removed = self.dissolve_hearts.remove(index);
        self.emit(StoreChange::EffectRemoved(EffectRef::Heart(id)));
        Some(removed)
    }

    pub fn remove_trace_path(&mut self, id: Uuid) -> Option<TracePath> {
        let index = self.tracings.iter().position(|e| e.id == id)?;
        let removed = self.tracings.remove(index);
        self.emit(StoreChange::EffectRemoved(EffectRef::Trace(id)));
        Some(removed)
    }

    /// Removes any effect by reference. Returns false if it was already gone.
    pub fn remove_effect(&mut self, effect: EffectRef) -> bool {
        match effect {
            EffectRef::Floating(id) => self.remove_floating_point(id).is_some(),
            EffectRef::Dissolve(id) => self.remove_dissolve_point(id).is_some(),
            EffectRef::Appear(id) => self.remove_appear_point(id).is_some(),
            EffectRef::Heart(id) => self.remove_dissolve_heart(id).is_some(),
            EffectRef::Trace(id) => self.remove_trace_path(id).is_some(),
        }
    }
}
