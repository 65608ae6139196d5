use nrp_model::Team;
use serde_json::{json, Value};

use crate::roster::RosterBuilder;

/// Builds a `replay.tracker.events` stream in dump format.
///
/// Records are appended in call order, stamped with the current gameloop.
#[derive(Clone, Debug, Default)]
pub struct TrackerStream {
    events: Vec<Value>,
    gameloop: u64,
}

impl TrackerStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp subsequent records with `gameloop`.
    pub fn at(&mut self, gameloop: u64) -> &mut Self {
        self.gameloop = gameloop;
        self
    }

    pub fn raw(&mut self, mut record: Value) -> &mut Self {
        if let Some(obj) = record.as_object_mut() {
            obj.entry("_gameloop").or_insert(json!(self.gameloop));
        }
        self.events.push(record);
        self
    }

    pub fn unrecognized(&mut self, event: &str) -> &mut Self {
        self.raw(json!({"_event": event, "_eventid": 99, "_bits": 8}))
    }

    fn stat(&mut self, name: &str, ints: &[(&str, i64)], strings: &[(&str, &str)]) -> &mut Self {
        let ints: Vec<Value> = ints
            .iter()
            .map(|(k, v)| json!({"m_key": k, "m_value": v}))
            .collect();
        let strings: Vec<Value> = strings
            .iter()
            .map(|(k, v)| json!({"m_key": k, "m_value": v}))
            .collect();
        self.raw(json!({
            "_event": "NNet.Replay.Tracker.SStatGameEvent",
            "_eventid": 10,
            "m_eventName": name,
            "m_intData": ints,
            "m_stringData": strings,
            "m_fixedData": null
        }))
    }

    pub fn player_init(&mut self, tracker_id: u32, controller: &str, handle: &str) -> &mut Self {
        self.stat(
            "PlayerInit",
            &[("PlayerID", i64::from(tracker_id)), ("Type", 1)],
            &[("Controller", controller), ("ToonHandle", handle)],
        )
    }

    /// `PlayerInit` for every roster entry; tracker ids are roster index + 1.
    pub fn init_roster(&mut self, roster: &RosterBuilder) -> &mut Self {
        for (i, p) in roster.players().iter().enumerate() {
            let controller = if p.computer { "Computer" } else { "User" };
            self.player_init(i as u32 + 1, controller, &p.handle());
        }
        self
    }

    /// `controlling_team` is 1-based: 1 is the left side.
    pub fn ban(&mut self, controlling_team: u32, hero: &str) -> &mut Self {
        self.raw(json!({
            "_event": "NNet.Replay.Tracker.SHeroBannedEvent",
            "_eventid": 13,
            "m_hero": hero,
            "m_controllingTeam": controlling_team
        }))
    }

    pub fn ban_by(&mut self, team: Team, hero: &str) -> &mut Self {
        self.ban(
            match team {
                Team::Left => 1,
                Team::Right => 2,
            },
            hero,
        )
    }

    pub fn pick(&mut self, working_set_slot: u32, hero: &str) -> &mut Self {
        self.raw(json!({
            "_event": "NNet.Replay.Tracker.SHeroPickedEvent",
            "_eventid": 14,
            "m_hero": hero,
            "m_controllingPlayer": working_set_slot
        }))
    }

    pub fn unit_born(&mut self, index: u32, recycle: u32, unit_type: &str) -> &mut Self {
        self.raw(json!({
            "_event": "NNet.Replay.Tracker.SUnitBornEvent",
            "_eventid": 1,
            "m_unitTagIndex": index,
            "m_unitTagRecycle": recycle,
            "m_unitTypeName": unit_type,
            "m_controlPlayerId": 0,
            "m_x": 0,
            "m_y": 0
        }))
    }

    pub fn core_born(&mut self, index: u32, recycle: u32) -> &mut Self {
        self.unit_born(index, recycle, "KingsCore")
    }

    pub fn unit_died(&mut self, index: u32, recycle: u32) -> &mut Self {
        self.raw(json!({
            "_event": "NNet.Replay.Tracker.SUnitDiedEvent",
            "_eventid": 2,
            "m_unitTagIndex": index,
            "m_unitTagRecycle": recycle,
            "m_killerPlayerId": null
        }))
    }

    /// `EndOfGameTalentChoices` for one tracker id. `hero` is the internal
    /// name without the `Hero` prefix.
    pub fn end_of_game(
        &mut self,
        tracker_id: u32,
        level: i64,
        hero: &str,
        won: bool,
        map: &str,
    ) -> &mut Self {
        let hero = format!("Hero{hero}");
        self.stat(
            "EndOfGameTalentChoices",
            &[("PlayerID", i64::from(tracker_id)), ("Level", level)],
            &[
                ("Hero", hero.as_str()),
                ("Win/Loss", if won { "Win" } else { "Loss" }),
                ("Map", map),
                ("Difficulty", ""),
            ],
        )
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// JSON Lines, one record per line.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for e in &self.events {
            out.extend_from_slice(e.to_string().as_bytes());
            out.push(b'\n');
        }
        out
    }
}

/// Internal names picked by [`complete_draft`], per side in pick order.
pub const LEFT_PICKS: [&str; 5] = ["Muradin", "DemonHunter", "Uther", "Zeratul", "Jaina"];
pub const RIGHT_PICKS: [&str; 5] = ["Crusader", "Raynor", "Malfurion", "Illidan", "Nova"];
pub const LEFT_BANS: [&str; 3] = ["Genji", "Tracer", "Anduin"];
pub const RIGHT_BANS: [&str; 3] = ["Diablo", "Kerrigan", "Rehgar"];

/// Append a full 3-ban / 5-pick draft in canonical arrival order.
///
/// Picks go to the roster's participants of each side in roster order.
pub fn complete_draft(stream: &mut TrackerStream, roster: &RosterBuilder, first: Team) {
    let second = first.other();
    let slots = |team: Team| -> Vec<u32> {
        roster
            .side(team)
            .into_iter()
            .filter_map(|i| roster.players()[i].working_set_slot)
            .collect()
    };
    let side_slots = [slots(first), slots(second)];
    let bans = |team: Team| if team == Team::Left { LEFT_BANS } else { RIGHT_BANS };
    let picks = |team: Team| if team == Team::Left { LEFT_PICKS } else { RIGHT_PICKS };
    let teams = [first, second];

    // (is_pick, turn, slot) where turn 0 is the first picker.
    const ORDER: [(bool, usize, usize); 16] = [
        (false, 0, 0),
        (false, 1, 0),
        (false, 0, 1),
        (false, 1, 1),
        (true, 0, 0),
        (true, 1, 0),
        (true, 1, 1),
        (true, 0, 1),
        (true, 0, 2),
        (false, 1, 2),
        (false, 0, 2),
        (true, 1, 2),
        (true, 1, 3),
        (true, 0, 3),
        (true, 0, 4),
        (true, 1, 4),
    ];
    for (is_pick, turn, slot) in ORDER {
        let team = teams[turn];
        if is_pick {
            if let Some(&wss) = side_slots[turn].get(slot) {
                stream.pick(wss, picks(team)[slot]);
            }
        } else {
            stream.ban_by(team, bans(team)[slot]);
        }
    }
}
