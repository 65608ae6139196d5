//! JSON dump decoder.
//!
//! Decodes streams that were already run through a binary decoder and dumped
//! as JSON using heroprotocol's `--json` field names (`m_version`,
//! `m_playerList`, `_event`, `_gameloop`, ...). Tracker events are a
//! sequence of concatenated JSON objects, one record each, decoded lazily.
//!
//! One `DumpDecoder` instance serves one base build. Field layouts of the
//! records the engine reads are identical across the builds the dumps come
//! from, so registering the same decoder under several builds is expected.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use nrp_model::Version;

use crate::attributes::{AttributeEvents, AttributeValue};
use crate::decoder::{DecodeError, ProtocolDecoder, TrackerEvents};
use crate::records::{
    HeroBanned, HeroPicked, InitData, ReplayDetails, ReplayHeader, RosterEntry, StatEvent,
    StatInt, StatString, Toon, TrackerEvent, TrackerEventKind, UnitBorn, UnitDied,
};

pub const EVENT_UNIT_BORN: &str = "NNet.Replay.Tracker.SUnitBornEvent";
pub const EVENT_UNIT_DIED: &str = "NNet.Replay.Tracker.SUnitDiedEvent";
pub const EVENT_STAT: &str = "NNet.Replay.Tracker.SStatGameEvent";
pub const EVENT_HERO_BANNED: &str = "NNet.Replay.Tracker.SHeroBannedEvent";
pub const EVENT_HERO_PICKED: &str = "NNet.Replay.Tracker.SHeroPickedEvent";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumpDecoder {
    base_build: u32,
}

impl DumpDecoder {
    pub fn new(base_build: u32) -> Self {
        Self { base_build }
    }
}

// ---------------------------------------------------------------------------
// Wire shapes (heroprotocol JSON naming)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct WireHeader {
    m_version: WireVersion,
    #[serde(default, rename = "m_elapsedGameLoops")]
    elapsed_game_loops: Option<u64>,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireVersion {
    m_baseBuild: u32,
    m_major: u32,
    m_minor: u32,
    m_revision: u32,
    m_build: u32,
    #[serde(default)]
    m_flags: Option<u32>,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireDetails {
    m_playerList: Vec<WirePlayer>,
    m_timeUTC: i64,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WirePlayer {
    m_name: String,
    m_toon: WireToon,
    m_teamId: u32,
    #[serde(default)]
    m_workingSetSlotId: Option<u32>,
    #[serde(default)]
    m_control: u32,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireToon {
    m_region: u32,
    m_programId: String,
    m_realm: u32,
    m_id: u64,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireInitData {
    m_syncLobbyState: WireLobbyState,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireLobbyState {
    m_gameDescription: WireGameDescription,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireGameDescription {
    m_gameOptions: WireGameOptions,
    m_randomValue: u32,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireGameOptions {
    #[serde(default)]
    m_ammId: Option<i64>,
}

#[derive(Deserialize)]
struct WireAttributes {
    scopes: BTreeMap<String, BTreeMap<String, Vec<WireAttribute>>>,
}

#[derive(Deserialize)]
struct WireAttribute {
    namespace: u32,
    attrid: u32,
    value: String,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireUnitBorn {
    m_unitTagIndex: u32,
    m_unitTagRecycle: u32,
    m_unitTypeName: String,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireUnitDied {
    m_unitTagIndex: u32,
    m_unitTagRecycle: u32,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireStat {
    m_eventName: String,
    #[serde(default)]
    m_intData: Option<Vec<WireKeyed<i64>>>,
    #[serde(default)]
    m_stringData: Option<Vec<WireKeyed<String>>>,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireKeyed<T> {
    m_key: String,
    m_value: T,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireHeroBanned {
    m_hero: String,
    m_controllingTeam: u32,
}

#[derive(Deserialize)]
#[allow(non_snake_case)]
struct WireHeroPicked {
    m_hero: String,
    m_controllingPlayer: u32,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn from_bytes<T: DeserializeOwned>(what: &str, bytes: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice(bytes).map_err(|e| DecodeError::new(what, e.to_string()))
}

fn from_value<T: DeserializeOwned>(what: &str, value: Value) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|e| DecodeError::new(what, e.to_string()))
}

fn parse_key(what: &str, key: &str) -> Result<u32, DecodeError> {
    key.parse()
        .map_err(|_| DecodeError::new(what, format!("non-numeric key '{key}'")))
}

fn decode_tracker_value(index: usize, value: Value) -> Result<TrackerEvent, DecodeError> {
    let what = format!("tracker event #{index}");
    let gameloop = value
        .get("_gameloop")
        .and_then(Value::as_u64)
        .ok_or_else(|| DecodeError::new(&what, "missing _gameloop"))?;
    let event = value
        .get("_event")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::new(&what, "missing _event"))?
        .to_string();

    let kind = match event.as_str() {
        EVENT_UNIT_BORN => {
            let w: WireUnitBorn = from_value(&what, value)?;
            TrackerEventKind::UnitBorn(UnitBorn {
                unit_tag_index: w.m_unitTagIndex,
                unit_tag_recycle: w.m_unitTagRecycle,
                unit_type_name: w.m_unitTypeName,
            })
        }
        EVENT_UNIT_DIED => {
            let w: WireUnitDied = from_value(&what, value)?;
            TrackerEventKind::UnitDied(UnitDied {
                unit_tag_index: w.m_unitTagIndex,
                unit_tag_recycle: w.m_unitTagRecycle,
            })
        }
        EVENT_STAT => {
            let w: WireStat = from_value(&what, value)?;
            TrackerEventKind::Stat(StatEvent {
                event_name: w.m_eventName,
                int_data: w
                    .m_intData
                    .unwrap_or_default()
                    .into_iter()
                    .map(|k| StatInt {
                        key: k.m_key,
                        value: k.m_value,
                    })
                    .collect(),
                string_data: w
                    .m_stringData
                    .unwrap_or_default()
                    .into_iter()
                    .map(|k| StatString {
                        key: k.m_key,
                        value: k.m_value,
                    })
                    .collect(),
            })
        }
        EVENT_HERO_BANNED => {
            let w: WireHeroBanned = from_value(&what, value)?;
            TrackerEventKind::HeroBanned(HeroBanned {
                hero: w.m_hero,
                controlling_team: w.m_controllingTeam,
            })
        }
        EVENT_HERO_PICKED => {
            let w: WireHeroPicked = from_value(&what, value)?;
            TrackerEventKind::HeroPicked(HeroPicked {
                hero: w.m_hero,
                controlling_player: w.m_controllingPlayer,
            })
        }
        _ => TrackerEventKind::Unrecognized { name: event },
    };

    Ok(TrackerEvent { gameloop, kind })
}

// ---------------------------------------------------------------------------
// ProtocolDecoder
// ---------------------------------------------------------------------------

impl ProtocolDecoder for DumpDecoder {
    fn base_build(&self) -> u32 {
        self.base_build
    }

    fn decode_header(&self, bytes: &[u8]) -> Result<ReplayHeader, DecodeError> {
        let w: WireHeader = from_bytes("header", bytes)?;
        Ok(ReplayHeader {
            version: Version {
                base_build: w.m_version.m_baseBuild,
                major: w.m_version.m_major,
                minor: w.m_version.m_minor,
                revision: w.m_version.m_revision,
                build: w.m_version.m_build,
                flags: w.m_version.m_flags,
            },
            elapsed_game_loops: w.elapsed_game_loops,
        })
    }

    fn decode_details(&self, bytes: &[u8]) -> Result<ReplayDetails, DecodeError> {
        let w: WireDetails = from_bytes("details", bytes)?;
        let players = w
            .m_playerList
            .into_iter()
            .map(|p| RosterEntry {
                name: p.m_name,
                toon: Toon {
                    region: p.m_toon.m_region,
                    program_id: p.m_toon.m_programId,
                    realm: p.m_toon.m_realm,
                    id: p.m_toon.m_id,
                },
                team_id: p.m_teamId,
                working_set_slot_id: p.m_workingSetSlotId,
                control: p.m_control,
            })
            .collect();
        Ok(ReplayDetails {
            players,
            time_utc: w.m_timeUTC,
        })
    }

    fn decode_initdata(&self, bytes: &[u8]) -> Result<InitData, DecodeError> {
        let w: WireInitData = from_bytes("initdata", bytes)?;
        let desc = w.m_syncLobbyState.m_gameDescription;
        Ok(InitData {
            amm_id: desc.m_gameOptions.m_ammId,
            random_value: desc.m_randomValue,
        })
    }

    fn decode_tracker_events<'a>(&self, bytes: &'a [u8]) -> TrackerEvents<'a> {
        let stream = serde_json::Deserializer::from_slice(bytes).into_iter::<Value>();
        Box::new(stream.enumerate().map(|(index, item)| {
            let value = item
                .map_err(|e| DecodeError::new(format!("tracker event #{index}"), e.to_string()))?;
            decode_tracker_value(index, value)
        }))
    }

    fn decode_attributes(&self, bytes: &[u8]) -> Result<AttributeEvents, DecodeError> {
        let w: WireAttributes = from_bytes("attributes", bytes)?;
        let mut attrs = AttributeEvents::default();
        for (scope_key, slots) in w.scopes {
            let scope = parse_key("attributes", &scope_key)?;
            for values in slots.into_values() {
                for v in values {
                    attrs.insert(
                        scope,
                        AttributeValue {
                            namespace: v.namespace,
                            attrid: v.attrid,
                            value: v.value,
                        },
                    );
                }
            }
        }
        Ok(attrs)
    }
}
