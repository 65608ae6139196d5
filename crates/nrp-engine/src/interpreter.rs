//! Event stream interpreter.
//!
//! One forward pass over the tracker records of one replay. State lives in
//! [`InterpreterState`], owned by a single parse; nothing is shared.
//!
//! Cross-reference tables:
//! - working-set slot -> participant (built from the roster up front)
//! - toon handle -> participant (human participants only)
//! - tracker id -> participant (bound lazily by `PlayerInit`, first wins)
//!
//! Unknown record kinds are skipped. A record naming a slot or tracker id
//! that was never established aborts the pass.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, warn};

use nrp_config::ParserSettings;
use nrp_model::{Battleground, DraftAction, DraftActionKind, Hero, PerSide, Team};
use nrp_protocol::{
    DecodeError, HeroBanned, HeroPicked, ReplayDetails, StatEvent, TrackerEvent,
    TrackerEventKind, STAT_END_OF_GAME, STAT_PLAYER_INIT,
};

use crate::duration::DurationTracker;
use crate::error::{ParseError, ParseStage, Reference};
use crate::heroes;

const STAGE: ParseStage = ParseStage::TrackerEvents;

/// Controller value of a computer slot in `PlayerInit` records.
pub const CONTROLLER_COMPUTER: &str = "Computer";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantState {
    pub id: String,
    pub display_name: String,
    pub side: Team,
    pub computer: bool,
    pub working_set_slot: Option<u32>,
    pub battletag: Option<String>,
    /// A pick record has been applied; later picks are ignored.
    pub picked: bool,
    pub hero: Option<Hero>,
    pub level: Option<u32>,
    pub winner: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct InterpreterState {
    /// Roster arrival order.
    pub participants: Vec<ParticipantState>,
    by_slot: HashMap<u32, usize>,
    by_handle: HashMap<String, usize>,
    by_tracker: BTreeMap<u32, usize>,
    computer_trackers: BTreeSet<u32>,
    pub bans: PerSide<Vec<DraftAction>>,
    pub picks: PerSide<Vec<DraftAction>>,
    /// Side of the first ban. Set once.
    pub first_pick: Option<Team>,
    /// Side of the first pick record, used when no ban was ever seen.
    pub first_pick_record: Option<Team>,
    draft_sequence: u32,
    /// A pick record was applied, or an end-of-match record named a hero.
    pub found_heroes: bool,
    pub map: Option<Battleground>,
    pub winner: Option<Team>,
    pub duration: DurationTracker,
}

impl InterpreterState {
    /// Enumerate the roster. Computer participants get `AI-1`, `AI-2`, ...
    /// in roster order.
    ///
    /// Two entries sharing a toon handle or a working-set slot are a
    /// malformed roster.
    pub fn from_roster(
        details: &ReplayDetails,
        settings: &ParserSettings,
    ) -> Result<Self, ParseError> {
        let mut participants = Vec::with_capacity(details.players.len());
        let mut by_slot = HashMap::new();
        let mut by_handle = HashMap::new();
        let mut next_ai = 1u32;

        for (index, entry) in details.players.iter().enumerate() {
            let computer = entry.is_computer();
            let id = if computer {
                let id = format!("AI-{next_ai}");
                next_ai += 1;
                id
            } else {
                let handle = entry.toon.handle();
                if by_handle.insert(handle.clone(), index).is_some() {
                    return Err(ParseError::malformed(
                        ParseStage::Roster,
                        format!("duplicate toon handle '{handle}'"),
                    ));
                }
                handle
            };
            if let Some(slot) = entry.working_set_slot_id {
                if by_slot.insert(slot, index).is_some() {
                    return Err(ParseError::malformed(
                        ParseStage::Roster,
                        format!("duplicate working-set slot {slot}"),
                    ));
                }
            }
            participants.push(ParticipantState {
                id,
                display_name: entry.name.clone(),
                side: Team::from_roster_team_id(entry.team_id),
                computer,
                working_set_slot: entry.working_set_slot_id,
                battletag: None,
                picked: false,
                hero: None,
                level: None,
                winner: None,
            });
        }

        Ok(Self {
            participants,
            by_slot,
            by_handle,
            by_tracker: BTreeMap::new(),
            computer_trackers: BTreeSet::new(),
            bans: PerSide::default(),
            picks: PerSide::default(),
            first_pick: None,
            first_pick_record: None,
            draft_sequence: 0,
            found_heroes: false,
            map: None,
            winner: None,
            duration: DurationTracker::new(
                settings.core_unit_type.clone(),
                settings.tick_offset,
                settings.ticks_per_second,
            ),
        })
    }

    /// Tracker ids bound so far, ascending, with their participant index.
    pub fn tracker_bindings(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.by_tracker.iter().map(|(t, i)| (*t, *i))
    }

    pub fn computer_tracker_ids(&self) -> &BTreeSet<u32> {
        &self.computer_trackers
    }

    pub fn participant_by_tracker(&self, tracker_id: u32) -> Option<&ParticipantState> {
        self.by_tracker
            .get(&tracker_id)
            .map(|&i| &self.participants[i])
    }

    fn next_sequence(&mut self) -> u32 {
        let seq = self.draft_sequence;
        self.draft_sequence += 1;
        seq
    }
}

fn tracker_id(stat: &StatEvent) -> Result<u32, ParseError> {
    let raw = stat.int("PlayerID").ok_or_else(|| {
        ParseError::malformed(STAGE, format!("{} record without PlayerID", stat.event_name))
    })?;
    u32::try_from(raw)
        .map_err(|_| ParseError::malformed(STAGE, format!("PlayerID out of range: {raw}")))
}

/// Single-pass dispatcher over tracker records.
pub struct EventStreamInterpreter {
    state: InterpreterState,
}

impl EventStreamInterpreter {
    pub fn new(state: InterpreterState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &InterpreterState {
        &self.state
    }

    pub fn into_state(self) -> InterpreterState {
        self.state
    }

    /// Consume a whole decoded stream. The first decode error or fatal
    /// record stops the pass.
    pub fn run<I>(&mut self, events: I) -> Result<usize, ParseError>
    where
        I: IntoIterator<Item = Result<TrackerEvent, DecodeError>>,
    {
        let mut count = 0;
        for event in events {
            let event = event.map_err(|source| ParseError::Decode {
                stage: STAGE,
                source,
            })?;
            self.apply(&event)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn apply(&mut self, event: &TrackerEvent) -> Result<(), ParseError> {
        match &event.kind {
            TrackerEventKind::UnitBorn(born) => self.state.duration.on_born(born),
            TrackerEventKind::UnitDied(died) => self.state.duration.on_died(event.gameloop, died),
            TrackerEventKind::HeroBanned(ban) => self.on_ban(ban)?,
            TrackerEventKind::HeroPicked(pick) => self.on_pick(pick)?,
            TrackerEventKind::Stat(stat) if stat.event_name == STAT_PLAYER_INIT => {
                self.on_player_init(stat)?
            }
            TrackerEventKind::Stat(stat) if stat.event_name == STAT_END_OF_GAME => {
                self.on_end_of_game(stat)?
            }
            TrackerEventKind::Stat(_) => {}
            TrackerEventKind::Unrecognized { name } => {
                debug!(gameloop = event.gameloop, kind = %name, "tracker/skip");
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Participants
    // -----------------------------------------------------------------------

    fn on_player_init(&mut self, stat: &StatEvent) -> Result<(), ParseError> {
        let tracker = tracker_id(stat)?;
        if self.state.by_tracker.contains_key(&tracker) {
            debug!(tracker, "player_init/duplicate ignored");
            return Ok(());
        }

        let is_computer = stat.string("Controller") == Some(CONTROLLER_COMPUTER);
        let handle = stat.string("ToonHandle").unwrap_or_default();

        let index = match self.state.by_handle.get(handle) {
            Some(&i) => i,
            None if is_computer => {
                // Computers share an empty toon; fall back to roster position.
                let roster_index = (tracker as usize).checked_sub(1);
                match roster_index {
                    Some(i) if self.state.participants.get(i).is_some_and(|p| p.computer) => i,
                    _ => {
                        return Err(ParseError::DanglingReference {
                            stage: STAGE,
                            reference: Reference::TrackerId(tracker),
                        })
                    }
                }
            }
            None => {
                return Err(ParseError::DanglingReference {
                    stage: STAGE,
                    reference: Reference::ToonHandle(handle.to_string()),
                })
            }
        };

        self.state.by_tracker.insert(tracker, index);
        if is_computer {
            self.state.computer_trackers.insert(tracker);
            self.state.participants[index].computer = true;
        }
        Ok(())
    }

    fn participant_index(&self, tracker: u32) -> Result<usize, ParseError> {
        self.state
            .by_tracker
            .get(&tracker)
            .copied()
            .ok_or(ParseError::DanglingReference {
                stage: STAGE,
                reference: Reference::TrackerId(tracker),
            })
    }

    // -----------------------------------------------------------------------
    // Draft
    // -----------------------------------------------------------------------

    fn on_ban(&mut self, ban: &HeroBanned) -> Result<(), ParseError> {
        let side = Team::from_controlling_team(ban.controlling_team);
        let hero = heroes::resolve_internal(&ban.hero, STAGE)?;
        self.state.first_pick.get_or_insert(side);

        let sequence_index = self.state.next_sequence();
        self.state.bans[side].push(DraftAction {
            kind: DraftActionKind::Ban,
            side,
            hero,
            sequence_index,
        });
        Ok(())
    }

    fn on_pick(&mut self, pick: &HeroPicked) -> Result<(), ParseError> {
        let index = self
            .state
            .by_slot
            .get(&pick.controlling_player)
            .copied()
            .ok_or(ParseError::DanglingReference {
                stage: STAGE,
                reference: Reference::WorkingSetSlot(pick.controlling_player),
            })?;
        let participant = &self.state.participants[index];
        if participant.picked {
            debug!(
                participant = %participant.id,
                hero = %pick.hero,
                "pick/duplicate ignored"
            );
            return Ok(());
        }
        let side = participant.side;
        let hero = heroes::resolve_internal(&pick.hero, STAGE)?;

        // Any pick record counts as hero data, even a skipped one.
        self.state.found_heroes = true;
        self.state.first_pick_record.get_or_insert(side);
        let sequence_index = self.state.next_sequence();
        self.state.picks[side].push(DraftAction {
            kind: DraftActionKind::Pick,
            side,
            hero,
            sequence_index,
        });

        let participant = &mut self.state.participants[index];
        participant.picked = true;
        if hero.is_some() {
            participant.hero = hero;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // End of match
    // -----------------------------------------------------------------------

    fn on_end_of_game(&mut self, stat: &StatEvent) -> Result<(), ParseError> {
        let index = self.participant_index(tracker_id(stat)?)?;

        let level = stat
            .int("Level")
            .map(|l| {
                u32::try_from(l)
                    .map_err(|_| ParseError::malformed(STAGE, format!("level out of range: {l}")))
            })
            .transpose()?;
        let hero = match stat.string("Hero") {
            Some(raw) => heroes::resolve_internal(raw.strip_prefix("Hero").unwrap_or(raw), STAGE)?,
            None => None,
        };
        let won = stat.string("Win/Loss").map(|w| w == "Win");

        if let Some(map_name) = stat.string("Map") {
            let map = Battleground::from_internal_name(map_name).unwrap_or_else(|| {
                warn!(map = %map_name, "map/unrecognized");
                Battleground::Other
            });
            self.state.map = Some(map);
        }

        let participant = &mut self.state.participants[index];
        if level.is_some() {
            participant.level = level;
        }
        if participant.hero.is_none() && hero.is_some() {
            participant.hero = hero;
        }
        if hero.is_some() {
            self.state.found_heroes = true;
        }
        if won.is_some() {
            participant.winner = won;
        }

        if won == Some(true) {
            let side = participant.side;
            if let Some(previous) = self.state.winner.filter(|&w| w != side) {
                warn!(previous = %previous, now = %side, "winner/contradiction");
            }
            self.state.winner = Some(side);
        }
        Ok(())
    }
}
