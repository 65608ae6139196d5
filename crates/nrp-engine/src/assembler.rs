use chrono::{DateTime, Utc};

use nrp_model::{Battleground, GameMode, MatchRecord, ParticipantRecord, PerSide, Version};

use crate::draft;
use crate::error::{ParseError, ParseStage};
use crate::identity::compute_match_id;
use crate::interpreter::InterpreterState;

/// Milliseconds between the FILETIME epoch (1601-01-01) and the Unix epoch.
const FILETIME_UNIX_OFFSET_MS: i64 = 11_644_473_600_000;

/// Convert a Windows FILETIME (100ns ticks since 1601) to UTC.
pub fn filetime_to_utc(time_utc: i64) -> Result<DateTime<Utc>, ParseError> {
    let ms = time_utc / 10_000 - FILETIME_UNIX_OFFSET_MS;
    DateTime::from_timestamp_millis(ms).ok_or_else(|| {
        ParseError::malformed(ParseStage::Roster, format!("timestamp out of range: {time_utc}"))
    })
}

/// Match-level facts read outside the tracker stream.
#[derive(Clone, Debug)]
pub struct MatchContext {
    pub version: Version,
    pub game_mode: GameMode,
    pub timestamp: DateTime<Utc>,
    pub seed: u32,
}

/// Turn the accumulated state into the final record.
pub fn assemble(state: InterpreterState, ctx: MatchContext) -> MatchRecord {
    let ids: Vec<&str> = state.participants.iter().map(|p| p.id.as_str()).collect();
    let id = compute_match_id(&ids, ctx.seed);

    // No left-side picks means the mode had no draft.
    let draft = if state.picks.left.is_empty() {
        None
    } else {
        state
            .first_pick
            .or(state.first_pick_record)
            .map(|fp| draft::reconstruct(state.bans.clone(), state.picks.clone(), fp))
    };

    let mut participants: PerSide<Vec<ParticipantRecord>> = PerSide::default();
    for p in state.participants {
        participants[p.side].push(ParticipantRecord {
            id: p.id,
            display_name: p.display_name,
            battletag: p.battletag,
            hero: p.hero,
            level: p.level,
            winner: p.winner,
            computer: p.computer,
        });
    }

    MatchRecord {
        id,
        version: ctx.version,
        game_mode: ctx.game_mode,
        duration_seconds: state.duration.duration_seconds(),
        timestamp: ctx.timestamp,
        participants,
        map: state.map.unwrap_or(Battleground::Other),
        winner: state.winner,
        draft,
    }
}
