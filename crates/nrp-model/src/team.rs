use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    Left,
    Right,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::Left, Team::Right];

    pub fn other(self) -> Team {
        match self {
            Team::Left => Team::Right,
            Team::Right => Team::Left,
        }
    }

    /// Roster team id: 0 is the left side, anything else the right side.
    pub fn from_roster_team_id(team_id: u32) -> Team {
        if team_id == 0 {
            Team::Left
        } else {
            Team::Right
        }
    }

    /// Draft records number the controlling team from 1; team 1 is the left side.
    pub fn from_controlling_team(controlling_team: u32) -> Team {
        if controlling_team == 1 {
            Team::Left
        } else {
            Team::Right
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Left => write!(f, "Left"),
            Team::Right => write!(f, "Right"),
        }
    }
}

/// A value held once per side, indexable by [`Team`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub left: T,
    pub right: T,
}

impl<T> PerSide<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    pub fn map<U>(self, mut f: impl FnMut(Team, T) -> U) -> PerSide<U> {
        PerSide {
            left: f(Team::Left, self.left),
            right: f(Team::Right, self.right),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        [(Team::Left, &self.left), (Team::Right, &self.right)].into_iter()
    }
}

impl<T> Index<Team> for PerSide<T> {
    type Output = T;

    fn index(&self, team: Team) -> &T {
        match team {
            Team::Left => &self.left,
            Team::Right => &self.right,
        }
    }
}

impl<T> IndexMut<Team> for PerSide<T> {
    fn index_mut(&mut self, team: Team) -> &mut T {
        match team {
            Team::Left => &mut self.left,
            Team::Right => &mut self.right,
        }
    }
}
