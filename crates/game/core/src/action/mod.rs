//! Action domain: payloads, kinds and the pure transition rules.
//!
//! Every executable payload implements [`ActionTransition`], which splits an
//! action into validation, planning and commit. The animated executors in the
//! runtime crate and the instant [`GameEngine`](crate::engine::GameEngine)
//! share these rules, so both always agree on the final ledger.
//!
//! # Module Structure
//!
//! - `error`: [`ActionError`] and the [`Resource`] an action spends
//! - `transition`: the [`ActionTransition`] trait and shared checks
//! - `spawn`, `share`, `fire`, `invest`, `movement`: executable payloads
//! - `deferred`: payloads of kinds that are declared but not executable yet

mod deferred;
mod error;
mod fire;
mod invest;
mod movement;
mod share;
mod spawn;
mod transition;

pub use deferred::{DieAction, HelpAction, JudgePoolAction};
pub use error::{ActionError, Resource};
pub use fire::{FireAction, FirePlan};
pub use invest::{InvestAction, InvestPlan};
pub use movement::{MoveAction, MovePlan};
pub use share::{ShareAction, SharePlan};
pub use spawn::{SpawnAction, SpawnPlan, SpawnProfile};
pub use transition::ActionTransition;

use crate::state::{Coordinates, PlayerId};

/// Discriminant of [`Action`], displayed the way the game names its kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ActionKind {
    Share,
    Fire,
    Invest,
    Help,
    Move,
    Die,
    JudgePool,
    Spawn,
}

impl ActionKind {
    /// Whether an executor exists for this kind.
    pub const fn is_executable(self) -> bool {
        !matches!(self, Self::Help | Self::Die | Self::JudgePool)
    }
}

/// A single game action as produced by the game logic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Share(ShareAction),
    Fire(FireAction),
    Invest(InvestAction),
    Help(HelpAction),
    Move(MoveAction),
    Die(DieAction),
    JudgePool(JudgePoolAction),
    Spawn(SpawnAction),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Share(_) => ActionKind::Share,
            Action::Fire(_) => ActionKind::Fire,
            Action::Invest(_) => ActionKind::Invest,
            Action::Help(_) => ActionKind::Help,
            Action::Move(_) => ActionKind::Move,
            Action::Die(_) => ActionKind::Die,
            Action::JudgePool(_) => ActionKind::JudgePool,
            Action::Spawn(_) => ActionKind::Spawn,
        }
    }

    pub fn has_executor(&self) -> bool {
        self.kind().is_executable()
    }

    /// Log line the action appends when it begins, if it is executable.
    pub fn describe(&self) -> Option<String> {
        match self {
            Action::Share(action) => Some(action.describe()),
            Action::Fire(action) => Some(action.describe()),
            Action::Invest(action) => Some(action.describe()),
            Action::Move(action) => Some(action.describe()),
            Action::Spawn(action) => Some(action.describe()),
            Action::Help(_) | Action::Die(_) | Action::JudgePool(_) => None,
        }
    }

    pub fn spawn(name: impl Into<PlayerId>, userpic: impl Into<String>, place: Coordinates) -> Self {
        Self::Spawn(SpawnAction::new(name, userpic, place))
    }

    pub fn share(from: impl Into<PlayerId>, to: impl Into<PlayerId>, amount: u32) -> Self {
        Self::Share(ShareAction::new(from, to, amount))
    }

    pub fn fire(attacker: impl Into<PlayerId>, victim: impl Into<PlayerId>, amount: u32) -> Self {
        Self::Fire(FireAction::new(attacker, victim, amount))
    }

    pub fn invest(who: impl Into<PlayerId>, amount: u32) -> Self {
        Self::Invest(InvestAction::new(who, amount))
    }

    pub fn move_to(who: impl Into<PlayerId>, to: Coordinates) -> Self {
        Self::Move(MoveAction::new(who, to))
    }
}

macro_rules! impl_from_payload {
    ($($payload:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for Action {
                fn from(action: $payload) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_payload! {
    ShareAction => Share,
    FireAction => Fire,
    InvestAction => Invest,
    HelpAction => Help,
    MoveAction => Move,
    DieAction => Die,
    JudgePoolAction => JudgePool,
    SpawnAction => Spawn,
}
