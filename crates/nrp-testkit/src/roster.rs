use nrp_model::Team;
use serde_json::{json, Value};

/// One roster slot of a fixture replay.
#[derive(Clone, Debug)]
pub struct FixturePlayer {
    pub name: String,
    pub team: Team,
    pub toon_id: u64,
    pub working_set_slot: Option<u32>,
    pub computer: bool,
}

impl FixturePlayer {
    /// Toon handle the tracker stream uses for this player.
    pub fn handle(&self) -> String {
        if self.computer {
            "0-S2-0-0".to_string()
        } else {
            format!("1-Hero-1-{}", self.toon_id)
        }
    }
}

/// Builds the roster (`replay.details`) of a fixture replay.
///
/// Working-set slots and toon ids follow insertion order.
#[derive(Clone, Debug, Default)]
pub struct RosterBuilder {
    players: Vec<FixturePlayer>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn human(mut self, name: &str, team: Team) -> Self {
        let index = self.players.len();
        self.players.push(FixturePlayer {
            name: name.to_string(),
            team,
            toon_id: 1000 + index as u64,
            working_set_slot: Some(index as u32),
            computer: false,
        });
        self
    }

    pub fn computer(mut self, team: Team) -> Self {
        let index = self.players.len();
        self.players.push(FixturePlayer {
            name: format!("Computer {}", index + 1),
            team,
            toon_id: 0,
            working_set_slot: Some(index as u32),
            computer: true,
        });
        self
    }

    /// Drop the working-set slot of the last player added.
    pub fn without_slot(mut self) -> Self {
        if let Some(last) = self.players.last_mut() {
            last.working_set_slot = None;
        }
        self
    }

    /// Override the toon id of the last player added.
    pub fn with_toon_id(mut self, toon_id: u64) -> Self {
        if let Some(last) = self.players.last_mut() {
            last.toon_id = toon_id;
        }
        self
    }

    pub fn players(&self) -> &[FixturePlayer] {
        &self.players
    }

    /// Roster indexes of one side, in roster order.
    pub fn side(&self, team: Team) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.team == team)
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn to_details_json(&self, time_utc: i64) -> Value {
        let players: Vec<Value> = self
            .players
            .iter()
            .map(|p| {
                let toon = if p.computer {
                    json!({"m_region": 0, "m_programId": "", "m_realm": 0, "m_id": 0})
                } else {
                    json!({"m_region": 1, "m_programId": "Hero", "m_realm": 1, "m_id": p.toon_id})
                };
                json!({
                    "m_name": p.name,
                    "m_toon": toon,
                    "m_teamId": match p.team { Team::Left => 0, Team::Right => 1 },
                    "m_workingSetSlotId": p.working_set_slot,
                    "m_control": if p.computer { 3 } else { 2 },
                    "m_result": 0
                })
            })
            .collect();
        json!({
            "m_playerList": players,
            "m_title": "Fixture Map",
            "m_timeUTC": time_utc,
            "m_timeLocalOffset": 0
        })
    }
}

/// Five humans per side; left side first.
pub fn ten_player_roster() -> RosterBuilder {
    let mut roster = RosterBuilder::new();
    for i in 0..5 {
        roster = roster.human(&format!("Left{i}"), Team::Left);
    }
    for i in 0..5 {
        roster = roster.human(&format!("Right{i}"), Team::Right);
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_player_roster_is_split_evenly() {
        let roster = ten_player_roster();
        assert_eq!(roster.side(Team::Left), vec![0, 1, 2, 3, 4]);
        assert_eq!(roster.side(Team::Right), vec![5, 6, 7, 8, 9]);
        assert_eq!(roster.players()[6].handle(), "1-Hero-1-1006");
    }
}
