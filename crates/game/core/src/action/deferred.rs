//! Action kinds that exist in the game vocabulary but have no rules yet.
//!
//! They can be constructed, serialized and carried through a scenario, but
//! every executor entry point rejects them as unsupported.
use crate::state::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HelpAction {
    pub judge_pool: u32,
    pub to: PlayerId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieAction {
    pub who: PlayerId,
    pub murderer: PlayerId,
    /// Points the player held at death.
    pub points: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JudgePoolAction {
    pub judges: Vec<PlayerId>,
    pub num: u32,
}
