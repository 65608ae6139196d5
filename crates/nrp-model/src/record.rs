use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Battleground, Draft, GameMode, Hero, PerSide, Team, Version};

/// One participant of the final record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// Account-derived identity, or a synthesised `AI-n` for computer players.
    pub id: String,
    pub display_name: String,
    /// `name#1234`, when the lobby stream carried it.
    pub battletag: Option<String>,
    pub hero: Option<Hero>,
    pub level: Option<u32>,
    pub winner: Option<bool>,
    pub computer: bool,
}

impl ParticipantRecord {
    /// Battletag when known, display name otherwise.
    pub fn label(&self) -> &str {
        self.battletag.as_deref().unwrap_or(&self.display_name)
    }
}

/// Normalized, analysis-ready record of one match. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub version: Version,
    pub game_mode: GameMode,
    pub duration_seconds: Option<f64>,
    pub timestamp: DateTime<Utc>,
    /// Participants per side, in roster arrival order.
    pub participants: PerSide<Vec<ParticipantRecord>>,
    pub map: Battleground,
    pub winner: Option<Team>,
    pub draft: Option<Draft>,
}

impl MatchRecord {
    pub fn heroes(&self) -> PerSide<Vec<Option<Hero>>> {
        self.participants
            .clone()
            .map(|_, ps| ps.into_iter().map(|p| p.hero).collect())
    }

    pub fn participant_count(&self) -> usize {
        self.participants.left.len() + self.participants.right.len()
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let players: Vec<&str> = self
            .participants
            .iter()
            .flat_map(|(_, ps)| ps.iter().map(ParticipantRecord::label))
            .collect();
        let heroes: Vec<&str> = self
            .participants
            .iter()
            .flat_map(|(_, ps)| {
                ps.iter()
                    .map(|p| p.hero.map(|h| h.display_name()).unwrap_or("?"))
            })
            .collect();
        let duration = self
            .duration_seconds
            .map(|s| format!("{s}"))
            .unwrap_or_else(|| "None".to_string());
        let winner = self
            .winner
            .map(|t| t.to_string())
            .unwrap_or_else(|| "None".to_string());
        let draft = self
            .draft
            .as_ref()
            .map(|d| d.state.to_string())
            .unwrap_or_else(|| "None".to_string());

        write!(
            f,
            "version={} mode={} duration={} date={} players=[{}] heroes=[{}] map={} winner={} draft={}",
            self.version,
            self.game_mode,
            duration,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            players.join(", "),
            heroes.join(", "),
            self.map,
            winner,
            draft
        )
    }
}
