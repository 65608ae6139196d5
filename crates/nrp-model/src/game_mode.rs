use serde::{Deserialize, Serialize};
use std::fmt;

/// Matchmaking mode of a replay, derived from the lobby AMM id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameMode {
    VersusAi,
    Practice,
    QuickMatch,
    UnrankedDraft,
    Brawl,
    Aram,
    Custom,
    HeroLeague,
    TeamLeague,
    StormLeague,
    Other,
}

impl GameMode {
    pub const ALL: [GameMode; 11] = [
        GameMode::VersusAi,
        GameMode::Practice,
        GameMode::QuickMatch,
        GameMode::UnrankedDraft,
        GameMode::Brawl,
        GameMode::Aram,
        GameMode::Custom,
        GameMode::HeroLeague,
        GameMode::TeamLeague,
        GameMode::StormLeague,
        GameMode::Other,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::VersusAi => "Versus A.I.",
            GameMode::Practice => "Practice",
            GameMode::QuickMatch => "Quick Match",
            GameMode::UnrankedDraft => "Unranked",
            GameMode::Brawl => "Brawl",
            GameMode::Aram => "ARAM",
            GameMode::Custom => "Custom",
            GameMode::HeroLeague => "Hero League",
            GameMode::TeamLeague => "Team League",
            GameMode::StormLeague => "Storm League",
            GameMode::Other => "Other",
        }
    }

    /// Map a lobby AMM id to a mode. Custom lobbies carry no AMM id (or -1).
    pub fn from_amm_id(amm_id: Option<i64>) -> GameMode {
        match amm_id {
            None | Some(-1) => GameMode::Custom,
            Some(50001) => GameMode::QuickMatch,
            Some(50021) => GameMode::VersusAi,
            Some(50031) => GameMode::Brawl,
            Some(50041) => GameMode::Practice,
            Some(50051) => GameMode::UnrankedDraft,
            Some(50061) => GameMode::HeroLeague,
            Some(50071) => GameMode::TeamLeague,
            Some(50091) => GameMode::StormLeague,
            Some(50101) => GameMode::Aram,
            Some(_) => GameMode::Other,
        }
    }

    /// Parse a mode from its display name or variant name (case-insensitive).
    pub fn parse(s: &str) -> Option<GameMode> {
        let wanted = s.trim();
        GameMode::ALL.into_iter().find(|m| {
            m.display_name().eq_ignore_ascii_case(wanted)
                || format!("{m:?}").eq_ignore_ascii_case(wanted)
        })
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
