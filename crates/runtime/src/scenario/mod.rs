//! Scripted action sequences.
//!
//! A [`Scenario`] is an ordered list of steps fed to the executors one at a
//! time. Steps are concrete [`Action`]s, or relative moves resolved against
//! the player's position at the moment the step is reached.

mod demo;

use std::path::Path;

use game_core::{Action, Coordinates, GameConfig, GameStore, PlayerId, StoreError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::executor;
use crate::scheduler::Scheduler;

/// One scripted step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioStep {
    Action(Action),
    /// Move `who` by `(dx, dy)` from wherever it stands when the step runs.
    MoveBy { who: PlayerId, dx: i32, dy: i32 },
}

impl ScenarioStep {
    pub fn move_by(who: impl Into<PlayerId>, dx: i32, dy: i32) -> Self {
        Self::MoveBy {
            who: who.into(),
            dx,
            dy,
        }
    }

    /// Turns the step into a concrete action, looking up current positions
    /// through `position_of`.
    pub fn resolve(
        &self,
        position_of: impl FnOnce(&PlayerId) -> Option<Coordinates>,
    ) -> Result<Action> {
        match self {
            ScenarioStep::Action(action) => Ok(action.clone()),
            ScenarioStep::MoveBy { who, dx, dy } => {
                let from = position_of(who)
                    .ok_or_else(|| StoreError::UnknownPlayer { id: who.clone() })?;
                Ok(Action::move_to(who.clone(), from.offset(*dx, *dy)))
            }
        }
    }
}

impl From<Action> for ScenarioStep {
    fn from(action: Action) -> Self {
        ScenarioStep::Action(action)
    }
}

/// A named, ordered list of steps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, steps: Vec<ScenarioStep>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Built-in demo: seventeen players trading shots, points and moves.
    pub fn demo() -> Self {
        demo::scenario()
    }

    /// Loads a scenario from a `.ron` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RuntimeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Ok(ron::from_str(&text)?),
            Some("json") => Ok(serde_json::from_str(&text)?),
            _ => Err(RuntimeError::UnknownScenarioFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Runs a scenario strictly in sequence and stops at the first failure.
#[derive(Debug)]
pub struct ScenarioDriver<'a> {
    scenario: &'a Scenario,
    config: GameConfig,
}

impl<'a> ScenarioDriver<'a> {
    pub fn new(scenario: &'a Scenario, config: GameConfig) -> Self {
        Self { scenario, config }
    }

    /// Drives every step directly against `store`.
    ///
    /// Returns the number of steps completed.
    pub async fn run(&self, store: &mut GameStore, scheduler: &dyn Scheduler) -> Result<usize> {
        self.started();
        for (index, step) in self.scenario.steps.iter().enumerate() {
            let action = step.resolve(|who| store.player(who.as_str()).map(|p| p.position))?;
            executor::run(action, store, scheduler, &self.config)
                .await
                .inspect_err(|error| self.stopped(index, error))?;
        }
        self.finished();
        Ok(self.scenario.len())
    }

    /// Sends every step through a running runtime.
    ///
    /// The runtime's own config applies; relative moves query the ledger
    /// right before they are sent.
    pub async fn run_on(&self, handle: &RuntimeHandle) -> Result<usize> {
        self.started();
        for (index, step) in self.scenario.steps.iter().enumerate() {
            let action = match step {
                ScenarioStep::Action(action) => action.clone(),
                ScenarioStep::MoveBy { .. } => {
                    let state = handle.query_state().await?;
                    step.resolve(|who| state.player(who.as_str()).map(|p| p.position))?
                }
            };
            handle
                .execute_action(action)
                .await
                .inspect_err(|error| self.stopped(index, error))?;
        }
        self.finished();
        Ok(self.scenario.len())
    }

    fn started(&self) {
        info!(
            target: "runtime::scenario",
            name = %self.scenario.name,
            steps = self.scenario.len(),
            "scenario started"
        );
    }

    fn stopped(&self, index: usize, error: &RuntimeError) {
        info!(
            target: "runtime::scenario",
            name = %self.scenario.name,
            step = index,
            %error,
            "scenario stopped"
        );
    }

    fn finished(&self) {
        info!(target: "runtime::scenario", name = %self.scenario.name, "scenario finished");
    }
}
