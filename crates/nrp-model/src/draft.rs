use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Hero, PerSide, Team};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftActionKind {
    Ban,
    Pick,
}

/// One recorded ban or pick.
///
/// `hero` is `None` for a skipped ban. `sequence_index` is the arrival
/// position across all draft records of the match (0-based).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAction {
    pub kind: DraftActionKind,
    pub side: Team,
    pub hero: Option<Hero>,
    pub sequence_index: u32,
}

/// One position of the canonical draft order.
///
/// `slot` indexes the side's ban or pick list. `action` is `None` when the
/// list never reached that slot (partial draft).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftStep {
    pub kind: DraftActionKind,
    pub side: Team,
    pub slot: usize,
    pub action: Option<DraftAction>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftState {
    Available,
    Incomplete,
}

impl fmt::Display for DraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftState::Available => write!(f, "Available"),
            DraftState::Incomplete => write!(f, "Incomplete"),
        }
    }
}

/// A reconstructed draft: per-side lists in arrival order plus the derived
/// canonical order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub first_pick: Team,
    pub bans: PerSide<Vec<DraftAction>>,
    pub picks: PerSide<Vec<DraftAction>>,
    pub order: Vec<DraftStep>,
    pub state: DraftState,
}

impl Draft {
    pub const BANS_PER_SIDE: usize = 3;
    pub const PICKS_PER_SIDE: usize = 5;

    pub fn is_complete(&self) -> bool {
        self.state == DraftState::Available
    }

    /// Heroes of the canonical order; `None` for skipped or missing steps.
    pub fn ordered_heroes(&self) -> Vec<Option<Hero>> {
        self.order
            .iter()
            .map(|step| step.action.as_ref().and_then(|a| a.hero))
            .collect()
    }
}

impl fmt::Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .ordered_heroes()
            .iter()
            .map(|h| h.map(|h| h.display_name()).unwrap_or("-"))
            .collect();
        write!(f, "[{}]", names.join(", "))
    }
}
