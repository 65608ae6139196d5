//! nrp-testkit
//!
//! Fixture replays for engine and CLI tests. Fixtures are written in the
//! JSON dump format so tests run through the real `DumpDecoder` and
//! `DecoderRegistry`.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use nrp_model::Team;
use nrp_protocol::{stream, DecoderRegistry, DumpDecoder, MemoryArchive};

mod roster;
mod tracker;

pub use roster::{ten_player_roster, FixturePlayer, RosterBuilder};
pub use tracker::{
    complete_draft, TrackerStream, LEFT_BANS, LEFT_PICKS, RIGHT_BANS, RIGHT_PICKS,
};

/// Base build fixtures are stamped with by default.
pub const FIXTURE_BUILD: u32 = 96370;

/// 2024-03-01T12:00:00Z as a Windows FILETIME.
pub const FIXTURE_TIME_UTC: i64 = 133_537_680_000_000_000;

pub const AMM_QUICK_MATCH: i64 = 50001;
pub const AMM_BRAWL: i64 = 50031;
pub const AMM_STORM_LEAGUE: i64 = 50091;
pub const AMM_ARAM: i64 = 50101;

/// Everything needed to pack one replay.
#[derive(Clone, Debug)]
pub struct ReplayFixture {
    pub base_build: u32,
    pub roster: RosterBuilder,
    pub time_utc: i64,
    pub amm_id: Option<i64>,
    pub random_value: u32,
    pub tracker: TrackerStream,
    /// Tracker id -> hero short code in attribute slot 4002.
    pub attributes: Option<BTreeMap<u32, String>>,
    pub lobby: Option<Vec<u8>>,
}

impl ReplayFixture {
    pub fn new(roster: RosterBuilder, tracker: TrackerStream) -> Self {
        Self {
            base_build: FIXTURE_BUILD,
            roster,
            time_utc: FIXTURE_TIME_UTC,
            amm_id: Some(AMM_STORM_LEAGUE),
            random_value: 4242,
            tracker,
            attributes: None,
            lobby: None,
        }
    }

    pub fn with_build(mut self, base_build: u32) -> Self {
        self.base_build = base_build;
        self
    }

    pub fn with_amm_id(mut self, amm_id: Option<i64>) -> Self {
        self.amm_id = amm_id;
        self
    }

    pub fn with_seed(mut self, random_value: u32) -> Self {
        self.random_value = random_value;
        self
    }

    pub fn with_attributes<'a>(mut self, codes: impl IntoIterator<Item = (u32, &'a str)>) -> Self {
        self.attributes = Some(codes.into_iter().map(|(t, c)| (t, c.to_string())).collect());
        self
    }

    /// Lobby bytes carrying `name#tag` for every named player.
    pub fn with_battletags<'a>(mut self, tags: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut lobby = b"\x00\x00s2ma\x00".to_vec();
        for (name, tag) in tags {
            lobby.extend_from_slice(format!("\x05{name}#{tag}\x00\x01").as_bytes());
        }
        self.lobby = Some(lobby);
        self
    }

    fn header_json(&self) -> Value {
        json!({
            "m_signature": "Heroes of the Storm replay\u{1b}11",
            "m_version": {
                "m_flags": 1,
                "m_major": 2,
                "m_minor": 55,
                "m_revision": 3,
                "m_build": self.base_build,
                "m_baseBuild": self.base_build
            },
            "m_type": 2,
            "m_elapsedGameLoops": 20000
        })
    }

    fn initdata_json(&self) -> Value {
        json!({
            "m_syncLobbyState": {
                "m_gameDescription": {
                    "m_gameOptions": {"m_ammId": self.amm_id, "m_competitive": false},
                    "m_randomValue": self.random_value,
                    "m_maxPlayers": 10
                }
            }
        })
    }

    fn attributes_json(codes: &BTreeMap<u32, String>) -> Value {
        let scopes: serde_json::Map<String, Value> = codes
            .iter()
            .map(|(tracker, code)| {
                (
                    tracker.to_string(),
                    json!({"4002": [{"namespace": 999, "attrid": 4002, "value": code}]}),
                )
            })
            .collect();
        json!({"source": 0, "mapNamespace": 999, "scopes": scopes})
    }

    /// Streams by name, in dump format.
    pub fn streams(&self) -> Vec<(&'static str, Vec<u8>)> {
        let mut out = vec![
            (stream::HEADER, self.header_json().to_string().into_bytes()),
            (
                stream::DETAILS,
                self.roster.to_details_json(self.time_utc).to_string().into_bytes(),
            ),
            (stream::INIT_DATA, self.initdata_json().to_string().into_bytes()),
            (stream::TRACKER_EVENTS, self.tracker.to_bytes()),
        ];
        if let Some(codes) = &self.attributes {
            out.push((
                stream::ATTRIBUTES_EVENTS,
                Self::attributes_json(codes).to_string().into_bytes(),
            ));
        }
        if let Some(lobby) = &self.lobby {
            out.push((stream::BATTLE_LOBBY, lobby.clone()));
        }
        out
    }
}

pub fn pack_archive(fixture: &ReplayFixture) -> MemoryArchive {
    let mut archive = MemoryArchive::new();
    for (name, bytes) in fixture.streams() {
        archive.insert(name, bytes);
    }
    archive
}

/// Write the fixture as a directory of extracted streams.
pub fn write_dir(fixture: &ReplayFixture, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create fixture dir: {}", dir.display()))?;
    for (name, bytes) in fixture.streams() {
        let path = dir.join(name);
        fs::write(&path, bytes).with_context(|| format!("write stream: {}", path.display()))?;
    }
    Ok(())
}

/// Registry with a `DumpDecoder` for each build.
pub fn dump_registry(builds: &[u32]) -> DecoderRegistry {
    let mut registry = DecoderRegistry::new();
    for &build in builds {
        // Duplicates in the list are harmless for tests.
        let _ = registry.register(Arc::new(DumpDecoder::new(build)));
    }
    registry
}

/// Ten players, complete draft (left picks first), a core that dies at
/// tick 2610, end-of-match summaries with the left side winning.
pub fn standard_match() -> ReplayFixture {
    let roster = ten_player_roster();
    let mut tracker = TrackerStream::new();
    tracker.at(0).init_roster(&roster);
    complete_draft(&mut tracker, &roster, Team::Left);
    tracker.at(610).core_born(42, 1).unrecognized("NNet.Replay.Tracker.SUpgradeEvent");
    tracker.at(2610).unit_died(42, 1);
    for (i, p) in roster.players().iter().enumerate() {
        let side_index = roster
            .side(p.team)
            .iter()
            .position(|&r| r == i)
            .unwrap_or(0);
        let hero = match p.team {
            Team::Left => LEFT_PICKS[side_index],
            Team::Right => RIGHT_PICKS[side_index],
        };
        tracker.end_of_game(i as u32 + 1, 20, hero, p.team == Team::Left, "HauntedWoods");
    }
    ReplayFixture::new(roster, tracker)
}
