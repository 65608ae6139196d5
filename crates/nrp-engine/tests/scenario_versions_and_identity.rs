//! Decoder resolution, match identity, enrichment
//!
//! Validates: replays from unknown builds fall back to the newest decoder,
//! identity depends only on who played and the lobby seed, and roster
//! enrichment fills battletags and computer identities.
//!
//! GREEN when:
//! - An unregistered build parses with the highest registered decoder.
//! - An empty registry refuses to parse.
//! - The same players and seed give the same id whatever the mode or map.
//! - A different seed gives a different id.
//! - Lobby bytes fill battletags only when enrichment is enabled.
//! - Computer players get AI-n ids and bind by roster position.
//! - A repeated pick for the same participant changes nothing.

use nrp_config::ParserSettings;
use nrp_engine::{parse_replay, ParseError};
use nrp_model::{DraftState, Hero, MatchRecord, Team};
use nrp_testkit::{
    dump_registry, pack_archive, standard_match, ten_player_roster, ReplayFixture,
    RosterBuilder, TrackerStream, AMM_QUICK_MATCH, FIXTURE_BUILD,
};

fn parse(fixture: &ReplayFixture, settings: &ParserSettings) -> Result<MatchRecord, ParseError> {
    parse_replay(
        &pack_archive(fixture),
        &dump_registry(&[FIXTURE_BUILD]),
        settings,
    )
}

// --- Decoder resolution ---

#[test]
fn unknown_build_falls_back_to_newest_decoder() {
    let fixture = standard_match().with_build(FIXTURE_BUILD + 500);
    let registry = dump_registry(&[70000, FIXTURE_BUILD]);

    let record = parse_replay(&pack_archive(&fixture), &registry, &ParserSettings::default())
        .unwrap();
    assert_eq!(record.version.base_build, FIXTURE_BUILD + 500);
    assert_eq!(record.duration_seconds, Some(125.0));
}

#[test]
fn empty_registry_refuses_to_parse() {
    let err = parse_replay(
        &pack_archive(&standard_match()),
        &dump_registry(&[]),
        &ParserSettings::default(),
    )
    .unwrap_err();
    assert_eq!(err, ParseError::NoDecoderAvailable { requested: None });
    assert_eq!(err.stage(), None);
}

// --- Identity ---

#[test]
fn identity_ignores_mode_and_map() {
    let settings = ParserSettings::default();
    let a = parse(&standard_match(), &settings).unwrap();
    let b = parse(&standard_match().with_amm_id(Some(AMM_QUICK_MATCH)), &settings).unwrap();
    assert_eq!(a.id, b.id);
    assert_ne!(a.game_mode, b.game_mode);
    assert_eq!(a.id.len(), 64);
}

#[test]
fn identity_changes_with_seed() {
    let settings = ParserSettings::default();
    let a = parse(&standard_match().with_seed(1), &settings).unwrap();
    let b = parse(&standard_match().with_seed(2), &settings).unwrap();
    assert_ne!(a.id, b.id);
}

// --- Enrichment ---

#[test]
fn battletags_come_from_lobby_bytes() {
    let fixture = standard_match().with_battletags([("Left0", 1234), ("Right4", 98765)]);

    let record = parse(&fixture, &ParserSettings::default()).unwrap();
    assert_eq!(
        record.participants.left[0].battletag.as_deref(),
        Some("Left0#1234")
    );
    assert_eq!(record.participants.left[0].label(), "Left0#1234");
    assert_eq!(
        record.participants.right[4].battletag.as_deref(),
        Some("Right4#98765")
    );
    assert!(record.participants.left[1].battletag.is_none());
    assert_eq!(record.participants.left[1].label(), "Left1");
}

#[test]
fn battletags_disabled_by_settings() {
    let fixture = standard_match().with_battletags([("Left0", 1234)]);
    let settings = ParserSettings {
        battletags: false,
        ..ParserSettings::default()
    };

    let record = parse(&fixture, &settings).unwrap();
    assert!(record.participants.left[0].battletag.is_none());
}

#[test]
fn computers_get_synthetic_ids() {
    let roster = RosterBuilder::new()
        .human("Solo", Team::Left)
        .computer(Team::Left)
        .computer(Team::Right)
        .computer(Team::Right);
    let mut tracker = TrackerStream::new();
    tracker.at(0).init_roster(&roster);
    tracker.at(20).pick(0, "Abathur").pick(1, "Tinker").pick(2, "Crusader").pick(3, "Nova");
    for i in 0..4u32 {
        tracker.end_of_game(i + 1, 5, "", i < 2, "Volskaya");
    }
    let fixture = ReplayFixture::new(roster, tracker);

    let record = parse(&fixture, &ParserSettings::default()).unwrap();
    let left = &record.participants.left;
    let right = &record.participants.right;
    assert_eq!(left[0].id, "1-Hero-1-1000");
    assert!(!left[0].computer);
    assert_eq!(left[1].id, "AI-1");
    assert_eq!(right[0].id, "AI-2");
    assert_eq!(right[1].id, "AI-3");
    assert!(right.iter().all(|p| p.computer));
    assert_eq!(left[1].hero, Some(Hero::Gazlowe));
    assert_eq!(right[1].winner, Some(false));
    assert_eq!(record.winner, Some(Team::Left));
}

// --- Idempotence ---

#[test]
fn repeated_pick_is_ignored() {
    let mut fixture = standard_match();
    fixture.tracker.at(3000).pick(0, "Abathur").pick(9, "Tinker");

    let record = parse(&fixture, &ParserSettings::default()).unwrap();
    let draft = record.draft.expect("draft");
    assert_eq!(draft.state, DraftState::Available);
    assert_eq!(draft.picks.left.len(), 5);
    assert_eq!(draft.picks.right.len(), 5);
    assert_eq!(record.participants.left[0].hero, Some(Hero::Muradin));
    assert_eq!(record.participants.right[4].hero, Some(Hero::Nova));
}

#[test]
fn partial_draft_is_incomplete() {
    let roster = ten_player_roster();
    let mut partial = TrackerStream::new();
    partial.at(0).init_roster(&roster);
    partial.at(10).ban_by(Team::Right, "Diablo").ban_by(Team::Left, "Genji");
    partial.at(20).pick(5, "Crusader").pick(0, "Muradin");

    let record = parse(&ReplayFixture::new(roster, partial), &ParserSettings::default()).unwrap();
    let draft = record.draft.expect("draft");
    assert_eq!(draft.state, DraftState::Incomplete);
    assert_eq!(draft.first_pick, Team::Right);
    assert_eq!(draft.order.len(), 16);
    assert_eq!(draft.ordered_heroes().iter().flatten().count(), 4);
}
