//! Draft reconstruction.
//!
//! Bans and picks arrive per side in stream order. The global order is not
//! recorded; it follows the game's fixed alternating convention:
//!
//! ```text
//! ban  fp0 sp0 fp1 sp1
//! pick fp0 sp0 sp1 fp1 fp2
//! ban  sp2 fp2
//! pick sp2 sp3 fp3 fp4 sp4
//! ```
//!
//! where `fp` is the first-picking side and `sp` the other.

use nrp_model::{Draft, DraftAction, DraftActionKind, DraftState, DraftStep, PerSide, Team};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn {
    First,
    Second,
}

use DraftActionKind::{Ban, Pick};
use Turn::{First, Second};

const CANONICAL_ORDER: [(DraftActionKind, Turn, usize); 16] = [
    (Ban, First, 0),
    (Ban, Second, 0),
    (Ban, First, 1),
    (Ban, Second, 1),
    (Pick, First, 0),
    (Pick, Second, 0),
    (Pick, Second, 1),
    (Pick, First, 1),
    (Pick, First, 2),
    (Ban, Second, 2),
    (Ban, First, 2),
    (Pick, Second, 2),
    (Pick, Second, 3),
    (Pick, First, 3),
    (Pick, First, 4),
    (Pick, Second, 4),
];

/// Build the canonical draft from per-side arrival lists.
///
/// A draft with anything other than exactly 3 bans and 5 picks per side is
/// still returned, flagged [`DraftState::Incomplete`]. Steps whose slot the
/// list never reached carry no action.
pub fn reconstruct(
    bans: PerSide<Vec<DraftAction>>,
    picks: PerSide<Vec<DraftAction>>,
    first_pick: Team,
) -> Draft {
    let order = CANONICAL_ORDER
        .iter()
        .map(|&(kind, turn, slot)| {
            let side = match turn {
                First => first_pick,
                Second => first_pick.other(),
            };
            let list = match kind {
                Ban => &bans[side],
                Pick => &picks[side],
            };
            DraftStep {
                kind,
                side,
                slot,
                action: list.get(slot).cloned(),
            }
        })
        .collect();

    let complete = Team::BOTH.iter().all(|&t| {
        bans[t].len() == Draft::BANS_PER_SIDE && picks[t].len() == Draft::PICKS_PER_SIDE
    });

    Draft {
        first_pick,
        bans,
        picks,
        order,
        state: if complete {
            DraftState::Available
        } else {
            DraftState::Incomplete
        },
    }
}
