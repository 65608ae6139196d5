//! Hero resolution chain.
//!
//! 1. Pick and end-of-match records, applied during the main pass.
//! 2. When no record named any hero at all, and the mode drafts, the
//!    attributes stream: each bound tracker id's hero slot holds a short code.
//!
//! Step 2 is all-or-nothing. One pick anywhere in the stream disables it even
//! if other participants are still without a hero.

use tracing::{debug, warn};

use nrp_config::ParserSettings;
use nrp_model::{GameMode, Hero};
use nrp_protocol::AttributeEvents;

use crate::error::{ParseError, ParseStage};
use crate::interpreter::InterpreterState;

/// Internal names that stand for "no hero" (a skipped ban).
const NO_HERO: [&str; 2] = ["", "NONE"];

pub fn resolve_internal(name: &str, stage: ParseStage) -> Result<Option<Hero>, ParseError> {
    let name = name.trim();
    if NO_HERO.contains(&name) {
        return Ok(None);
    }
    Hero::from_internal_name(name)
        .map(Some)
        .ok_or_else(|| ParseError::UnknownHero {
            stage,
            name: name.to_string(),
        })
}

pub fn resolve_short(code: &str, stage: ParseStage) -> Result<Hero, ParseError> {
    Hero::from_short_code(code).ok_or_else(|| ParseError::UnknownHero {
        stage,
        name: code.to_string(),
    })
}

/// Whether the attributes stream should be consulted at all.
pub fn needs_attribute_fallback(
    state: &InterpreterState,
    mode: GameMode,
    settings: &ParserSettings,
) -> bool {
    !state.found_heroes && settings.fallback_allowed(mode)
}

/// Fill heroes from the attributes stream for every bound tracker id.
///
/// A participant that already has a hero keeps it. Returns the number of
/// participants resolved by this step.
pub fn apply_attribute_fallback(
    state: &mut InterpreterState,
    attributes: &AttributeEvents,
    attribute_id: u32,
) -> Result<usize, ParseError> {
    const STAGE: ParseStage = ParseStage::Attributes;

    let bindings: Vec<(u32, usize)> = state.tracker_bindings().collect();
    let mut resolved = 0;
    for (tracker, index) in bindings {
        let code = attributes
            .value(tracker, attribute_id)
            .map_err(|source| ParseError::MissingAttribute {
                stage: STAGE,
                source,
            })?;
        let hero = resolve_short(code, STAGE)?;

        let participant = &mut state.participants[index];
        if participant.hero.is_none() {
            debug!(participant = %participant.id, hero = %hero, "hero/attribute");
            participant.hero = Some(hero);
            resolved += 1;
        }
    }
    Ok(resolved)
}

/// Log every participant the chain left without a hero.
pub fn report_unresolved(state: &InterpreterState) -> usize {
    let mut missing = 0;
    for p in state.participants.iter().filter(|p| p.hero.is_none()) {
        warn!(participant = %p.id, name = %p.display_name, "hero/unresolved");
        missing += 1;
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::EventStreamInterpreter;
    use nrp_protocol::{
        AttributeError, AttributeValue, ReplayDetails, RosterEntry, StatEvent, StatInt,
        StatString, Toon, TrackerEvent, TrackerEventKind, STAT_PLAYER_INIT,
    };

    #[test]
    fn internal_names_resolve_or_fail() {
        let stage = ParseStage::TrackerEvents;
        assert_eq!(resolve_internal("FaerieDragon", stage), Ok(Some(Hero::Brightwing)));
        assert_eq!(resolve_internal("NONE", stage), Ok(None));
        assert_eq!(resolve_internal("", stage), Ok(None));
        assert!(matches!(
            resolve_internal("Faer", stage),
            Err(ParseError::UnknownHero { .. })
        ));
    }

    #[test]
    fn short_codes_resolve_or_fail() {
        let stage = ParseStage::Attributes;
        assert_eq!(resolve_short("Tink", stage), Ok(Hero::Gazlowe));
        assert_eq!(
            resolve_short("Zzzz", stage),
            Err(ParseError::UnknownHero {
                stage,
                name: "Zzzz".to_string()
            })
        );
    }

    fn bound_state(handles: &[&str]) -> InterpreterState {
        let details = ReplayDetails {
            players: handles
                .iter()
                .enumerate()
                .map(|(i, _)| RosterEntry {
                    name: format!("P{i}"),
                    toon: Toon {
                        region: 1,
                        program_id: "Hero".to_string(),
                        realm: 1,
                        id: i as u64 + 1,
                    },
                    team_id: (i % 2) as u32,
                    working_set_slot_id: Some(i as u32),
                    control: 2,
                })
                .collect(),
            time_utc: 0,
        };
        let settings = ParserSettings::default();
        let mut it = EventStreamInterpreter::new(InterpreterState::from_roster(&details, &settings).unwrap());
        for (i, handle) in handles.iter().enumerate() {
            it.apply(&TrackerEvent {
                gameloop: 1,
                kind: TrackerEventKind::Stat(StatEvent {
                    event_name: STAT_PLAYER_INIT.to_string(),
                    int_data: vec![StatInt {
                        key: "PlayerID".to_string(),
                        value: i as i64 + 1,
                    }],
                    string_data: vec![
                        StatString {
                            key: "Controller".to_string(),
                            value: "User".to_string(),
                        },
                        StatString {
                            key: "ToonHandle".to_string(),
                            value: handle.to_string(),
                        },
                    ],
                }),
            })
            .unwrap();
        }
        it.into_state()
    }

    fn hero_slot(value: &str) -> AttributeValue {
        AttributeValue {
            namespace: 999,
            attrid: 4002,
            value: value.to_string(),
        }
    }

    #[test]
    fn fallback_fills_every_bound_participant() {
        let mut state = bound_state(&["1-Hero-1-1", "1-Hero-1-2"]);
        let mut attrs = AttributeEvents::default();
        attrs.insert(1, hero_slot("Abat"));
        attrs.insert(2, hero_slot("Tink"));

        assert!(needs_attribute_fallback(
            &state,
            GameMode::QuickMatch,
            &ParserSettings::default()
        ));
        assert_eq!(apply_attribute_fallback(&mut state, &attrs, 4002), Ok(2));
        assert_eq!(state.participants[0].hero, Some(Hero::Abathur));
        assert_eq!(state.participants[1].hero, Some(Hero::Gazlowe));
        assert_eq!(report_unresolved(&state), 0);
    }

    #[test]
    fn fallback_is_skipped_in_excluded_modes() {
        let state = bound_state(&["1-Hero-1-1"]);
        let settings = ParserSettings::default();
        assert!(!needs_attribute_fallback(&state, GameMode::Aram, &settings));
        assert!(!needs_attribute_fallback(&state, GameMode::Brawl, &settings));
    }

    #[test]
    fn missing_slot_is_a_named_error() {
        let mut state = bound_state(&["1-Hero-1-1", "1-Hero-1-2"]);
        let mut attrs = AttributeEvents::default();
        attrs.insert(1, hero_slot("Abat"));

        let err = apply_attribute_fallback(&mut state, &attrs, 4002).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingAttribute {
                stage: ParseStage::Attributes,
                source: AttributeError::MissingScope { scope: 2 }
            }
        );
    }
}
