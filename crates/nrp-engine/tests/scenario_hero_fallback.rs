//! Hero resolution chain
//!
//! Validates: heroes come from pick and end-of-match records first, and the
//! attributes stream is only consulted when no record named any hero and
//! the mode drafts.
//!
//! GREEN when:
//! - A Quick Match replay with no hero records resolves every hero from the
//!   attributes stream.
//! - A single pick anywhere disables the attributes step entirely, even one
//!   naming no hero.
//! - ARAM never consults the attributes stream, and has no draft.
//! - A bound participant without an attributes hero slot fails the parse.
//! - A missing attributes stream leaves heroes unresolved without failing.

use nrp_config::ParserSettings;
use nrp_engine::{parse_replay, ParseError, ParseStage};
use nrp_model::{GameMode, Hero, Team};
use nrp_testkit::{
    dump_registry, pack_archive, ten_player_roster, ReplayFixture, TrackerStream, AMM_ARAM,
    AMM_QUICK_MATCH, FIXTURE_BUILD,
};

const CODES: [&str; 10] = [
    "Mura", "Demo", "Uthe", "Zera", "Jain", "Crus", "Rayn", "Malf", "Illi", "Nova",
];

/// Roster bound, core born and killed, summaries without hero names.
fn heroless_tracker() -> TrackerStream {
    let roster = ten_player_roster();
    let mut tracker = TrackerStream::new();
    tracker.at(0).init_roster(&roster);
    tracker.at(610).core_born(7, 1);
    tracker.at(1810).unit_died(7, 1);
    for (i, p) in roster.players().iter().enumerate() {
        tracker.end_of_game(i as u32 + 1, 12, "", p.team == Team::Right, "BattlefieldOfEternity");
    }
    tracker
}

fn all_codes() -> Vec<(u32, &'static str)> {
    CODES
        .iter()
        .enumerate()
        .map(|(i, c)| (i as u32 + 1, *c))
        .collect()
}

fn parse(fixture: &ReplayFixture) -> Result<nrp_model::MatchRecord, ParseError> {
    parse_replay(
        &pack_archive(fixture),
        &dump_registry(&[FIXTURE_BUILD]),
        &ParserSettings::default(),
    )
}

#[test]
fn quick_match_without_hero_records_uses_attributes() {
    let fixture = ReplayFixture::new(ten_player_roster(), heroless_tracker())
        .with_amm_id(Some(AMM_QUICK_MATCH))
        .with_attributes(all_codes());

    let record = parse(&fixture).unwrap();
    assert_eq!(record.game_mode, GameMode::QuickMatch);
    assert_eq!(
        record.heroes().left,
        vec![
            Some(Hero::Muradin),
            Some(Hero::Valla),
            Some(Hero::Uther),
            Some(Hero::Zeratul),
            Some(Hero::Jaina)
        ]
    );
    assert_eq!(record.heroes().right[0], Some(Hero::Johanna));
    assert_eq!(record.winner, Some(Team::Right));
    assert_eq!(record.duration_seconds, Some(75.0));
    assert!(record.draft.is_none());
}

#[test]
fn one_pick_disables_the_attributes_step() {
    let mut tracker = heroless_tracker();
    tracker.pick(0, "Abathur");
    let fixture = ReplayFixture::new(ten_player_roster(), tracker)
        .with_amm_id(Some(AMM_QUICK_MATCH))
        .with_attributes(all_codes());

    let record = parse(&fixture).unwrap();
    let heroes = record.heroes();
    assert_eq!(heroes.left[0], Some(Hero::Abathur));
    assert!(heroes.left[1..].iter().all(Option::is_none));
    assert!(heroes.right.iter().all(Option::is_none));
}

#[test]
fn skipped_pick_still_disables_the_attributes_step() {
    let mut tracker = heroless_tracker();
    tracker.pick(0, "NONE");
    let fixture = ReplayFixture::new(ten_player_roster(), tracker)
        .with_amm_id(Some(AMM_QUICK_MATCH))
        .with_attributes(all_codes());

    let record = parse(&fixture).unwrap();
    assert!(record
        .participants
        .iter()
        .all(|(_, ps)| ps.iter().all(|p| p.hero.is_none())));
    let draft = record.draft.expect("draft");
    assert_eq!(draft.picks.left.len(), 1);
}

#[test]
fn aram_never_consults_attributes() {
    let fixture = ReplayFixture::new(ten_player_roster(), heroless_tracker())
        .with_amm_id(Some(AMM_ARAM))
        .with_attributes(all_codes());

    let record = parse(&fixture).unwrap();
    assert_eq!(record.game_mode, GameMode::Aram);
    assert!(record.draft.is_none());
    assert!(record
        .participants
        .iter()
        .all(|(_, ps)| ps.iter().all(|p| p.hero.is_none())));
}

#[test]
fn aram_heroes_come_from_end_of_match_records() {
    let roster = ten_player_roster();
    let mut tracker = TrackerStream::new();
    tracker.at(0).init_roster(&roster);
    for i in 0..10u32 {
        let hero = if i < 5 { "Tinker" } else { "FaerieDragon" };
        tracker.end_of_game(i + 1, 10, hero, i < 5, "Crypts");
    }
    let fixture = ReplayFixture::new(roster, tracker).with_amm_id(Some(AMM_ARAM));

    let record = parse(&fixture).unwrap();
    assert!(record.draft.is_none());
    assert!(record.duration_seconds.is_none());
    assert!(record.heroes().left.iter().all(|h| *h == Some(Hero::Gazlowe)));
    assert!(record.heroes().right.iter().all(|h| *h == Some(Hero::Brightwing)));
}

#[test]
fn missing_hero_slot_for_bound_participant_is_fatal() {
    let mut codes = all_codes();
    codes.pop();
    let fixture = ReplayFixture::new(ten_player_roster(), heroless_tracker())
        .with_amm_id(Some(AMM_QUICK_MATCH))
        .with_attributes(codes);

    let err = parse(&fixture).unwrap_err();
    assert!(matches!(err, ParseError::MissingAttribute { .. }), "{err}");
    assert_eq!(err.stage(), Some(ParseStage::Attributes));
}

#[test]
fn unknown_short_code_is_fatal() {
    let mut codes = all_codes();
    codes[3].1 = "Zzzz";
    let fixture = ReplayFixture::new(ten_player_roster(), heroless_tracker())
        .with_amm_id(Some(AMM_QUICK_MATCH))
        .with_attributes(codes);

    let err = parse(&fixture).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownHero {
            stage: ParseStage::Attributes,
            name: "Zzzz".to_string()
        }
    );
}

#[test]
fn missing_attributes_stream_leaves_heroes_unresolved() {
    let fixture = ReplayFixture::new(ten_player_roster(), heroless_tracker())
        .with_amm_id(Some(AMM_QUICK_MATCH));

    let record = parse(&fixture).unwrap();
    assert!(record.heroes().left.iter().all(Option::is_none));
    assert_eq!(record.participant_count(), 10);
}
