//! Parse failures are atomic and named
//!
//! Validates: every fatal condition surfaces as a typed ParseError carrying
//! its stage, and optional streams degrade instead of failing.
//!
//! GREEN when:
//! - A pick naming an unknown working-set slot is a DanglingReference.
//! - An unmapped internal hero name is UnknownHero.
//! - A summary for a tracker id never initialised is a DanglingReference.
//! - A missing required stream is StreamNotFound for its stage.
//! - A corrupt tracker record is a Decode error in the tracker stage.
//! - An absent lobby stream only drops battletags.
//! - Two roster entries sharing a toon handle fail in the roster stage.

use nrp_config::ParserSettings;
use nrp_engine::{parse_replay, ParseError, ParseStage, Reference};
use nrp_protocol::stream;
use nrp_model::Team;
use nrp_testkit::{
    dump_registry, pack_archive, standard_match, ten_player_roster, ReplayFixture,
    RosterBuilder, TrackerStream, FIXTURE_BUILD,
};
use serde_json::json;

fn parse_archive(archive: &nrp_protocol::MemoryArchive) -> Result<nrp_model::MatchRecord, ParseError> {
    parse_replay(
        archive,
        &dump_registry(&[FIXTURE_BUILD]),
        &ParserSettings::default(),
    )
}

fn fixture_with(extra: impl FnOnce(&mut TrackerStream)) -> ReplayFixture {
    let roster = ten_player_roster();
    let mut tracker = TrackerStream::new();
    tracker.at(0).init_roster(&roster);
    extra(&mut tracker);
    ReplayFixture::new(roster, tracker)
}

#[test]
fn pick_for_unknown_slot_is_dangling() {
    let fixture = fixture_with(|t| {
        t.at(100).pick(42, "Muradin");
    });
    let err = parse_archive(&pack_archive(&fixture)).unwrap_err();
    assert_eq!(
        err,
        ParseError::DanglingReference {
            stage: ParseStage::TrackerEvents,
            reference: Reference::WorkingSetSlot(42),
        }
    );
}

#[test]
fn unmapped_hero_name_is_unknown_hero() {
    let fixture = fixture_with(|t| {
        t.at(100).pick(0, "Frobnicator");
    });
    let err = parse_archive(&pack_archive(&fixture)).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownHero {
            stage: ParseStage::TrackerEvents,
            name: "Frobnicator".to_string(),
        }
    );
}

#[test]
fn summary_for_uninitialised_tracker_is_dangling() {
    let fixture = fixture_with(|t| {
        t.at(3000).end_of_game(11, 20, "Muradin", true, "Crypts");
    });
    let err = parse_archive(&pack_archive(&fixture)).unwrap_err();
    assert!(
        matches!(
            err,
            ParseError::DanglingReference {
                reference: Reference::TrackerId(11),
                ..
            }
        ),
        "{err}"
    );
}

#[test]
fn skipped_ban_is_not_an_error() {
    let fixture = fixture_with(|t| {
        t.at(50).ban(1, "").ban(2, "NONE");
    });
    let record = parse_archive(&pack_archive(&fixture)).unwrap();
    // No picks, so no draft even though bans were seen.
    assert!(record.draft.is_none());
}

#[test]
fn missing_required_streams_are_named() {
    let cases = [
        (stream::HEADER, ParseStage::Header),
        (stream::DETAILS, ParseStage::Roster),
        (stream::INIT_DATA, ParseStage::InitData),
        (stream::TRACKER_EVENTS, ParseStage::TrackerEvents),
    ];
    for (name, stage) in cases {
        let mut archive = pack_archive(&standard_match());
        archive.remove(name);
        let err = parse_archive(&archive).unwrap_err();
        assert_eq!(
            err,
            ParseError::StreamNotFound {
                stage,
                stream: name.to_string(),
            },
            "{name}"
        );
        assert_eq!(err.stage(), Some(stage));
    }
}

#[test]
fn corrupt_tracker_record_is_a_decode_error() {
    let fixture = fixture_with(|t| {
        t.at(10).raw(json!({"_event": "NNet.Replay.Tracker.SHeroPickedEvent", "m_hero": 5}));
    });
    let err = parse_archive(&pack_archive(&fixture)).unwrap_err();
    assert!(matches!(err, ParseError::Decode { .. }), "{err}");
    assert_eq!(err.stage(), Some(ParseStage::TrackerEvents));
}

#[test]
fn missing_lobby_only_drops_battletags() {
    let archive = pack_archive(&standard_match());
    assert!(!archive.names().any(|n| n == stream::BATTLE_LOBBY));

    let record = parse_archive(&archive).unwrap();
    assert!(record
        .participants
        .iter()
        .all(|(_, ps)| ps.iter().all(|p| p.battletag.is_none())));
    assert_eq!(record.participant_count(), 10);
}

#[test]
fn error_display_names_the_stage() {
    let mut archive = pack_archive(&standard_match());
    archive.remove(stream::INIT_DATA);
    let msg = parse_archive(&archive).unwrap_err().to_string();
    assert!(msg.starts_with("[init-data]"), "{msg}");
    assert!(msg.contains(stream::INIT_DATA), "{msg}");
}

#[test]
fn shared_toon_handle_is_a_malformed_roster() {
    let roster = RosterBuilder::new()
        .human("First", Team::Left)
        .with_toon_id(10)
        .human("Second", Team::Right)
        .with_toon_id(10);
    let fixture = ReplayFixture::new(roster, TrackerStream::new());

    let err = parse_archive(&pack_archive(&fixture)).unwrap_err();
    assert!(
        matches!(
            err,
            ParseError::MalformedRecord {
                stage: ParseStage::Roster,
                ..
            }
        ),
        "{err}"
    );
}
