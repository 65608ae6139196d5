//! Typed records produced by a [`ProtocolDecoder`](crate::ProtocolDecoder).
//!
//! Only the fields the engine reads are modelled. Anything else a decoder
//! sees is dropped at the boundary.

use nrp_model::Version;

/// Roster control code for computer-controlled slots.
pub const CONTROL_COMPUTER: u32 = 3;

/// Stat record announcing a participant and its tracker id.
pub const STAT_PLAYER_INIT: &str = "PlayerInit";

/// Stat record carrying each participant's end-of-match summary.
pub const STAT_END_OF_GAME: &str = "EndOfGameTalentChoices";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayHeader {
    pub version: Version,
    pub elapsed_game_loops: Option<u64>,
}

/// Account handle of a roster entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toon {
    pub region: u32,
    pub program_id: String,
    pub realm: u32,
    pub id: u64,
}

impl Toon {
    /// `region-program-realm-id`, the form tracker records use as `ToonHandle`.
    pub fn handle(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.region, self.program_id, self.realm, self.id
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub toon: Toon,
    pub team_id: u32,
    pub working_set_slot_id: Option<u32>,
    pub control: u32,
}

impl RosterEntry {
    pub fn is_computer(&self) -> bool {
        self.control == CONTROL_COMPUTER || self.toon.id == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayDetails {
    pub players: Vec<RosterEntry>,
    /// Windows FILETIME (100ns ticks since 1601-01-01 UTC).
    pub time_utc: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitData {
    /// Matchmaking queue id; absent for custom lobbies.
    pub amm_id: Option<i64>,
    /// Per-match random seed.
    pub random_value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerEvent {
    pub gameloop: u64,
    pub kind: TrackerEventKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerEventKind {
    UnitBorn(UnitBorn),
    UnitDied(UnitDied),
    Stat(StatEvent),
    HeroBanned(HeroBanned),
    HeroPicked(HeroPicked),
    /// Any record kind the engine does not read.
    Unrecognized { name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitBorn {
    pub unit_tag_index: u32,
    pub unit_tag_recycle: u32,
    pub unit_type_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitDied {
    pub unit_tag_index: u32,
    pub unit_tag_recycle: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatInt {
    pub key: String,
    pub value: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatString {
    pub key: String,
    pub value: String,
}

/// Generic named stat record with keyed int and string payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatEvent {
    pub event_name: String,
    pub int_data: Vec<StatInt>,
    pub string_data: Vec<StatString>,
}

impl StatEvent {
    pub fn int(&self, key: &str) -> Option<i64> {
        self.int_data.iter().find(|e| e.key == key).map(|e| e.value)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.string_data
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroBanned {
    pub hero: String,
    /// 1-based team number.
    pub controlling_team: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroPicked {
    pub hero: String,
    /// Working-set slot of the picking participant.
    pub controlling_player: u32,
}
