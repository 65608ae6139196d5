use std::collections::HashSet;

use nrp_protocol::{UnitBorn, UnitDied};

/// Identity of one unit, stable between its birth and death records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoreKey {
    pub unit_tag_index: u32,
    pub unit_tag_recycle: u32,
}

/// Pairs core-structure births with deaths to time the match.
#[derive(Clone, Debug)]
pub struct DurationTracker {
    core_unit_type: String,
    tick_offset: u64,
    ticks_per_second: u64,
    alive: HashSet<CoreKey>,
    duration_seconds: Option<f64>,
}

impl DurationTracker {
    pub fn new(core_unit_type: impl Into<String>, tick_offset: u64, ticks_per_second: u64) -> Self {
        Self {
            core_unit_type: core_unit_type.into(),
            tick_offset,
            ticks_per_second,
            alive: HashSet::new(),
            duration_seconds: None,
        }
    }

    pub fn on_born(&mut self, born: &UnitBorn) {
        if born.unit_type_name == self.core_unit_type {
            self.alive.insert(CoreKey {
                unit_tag_index: born.unit_tag_index,
                unit_tag_recycle: born.unit_tag_recycle,
            });
        }
    }

    /// Deaths of units never born as a core are ignored.
    pub fn on_died(&mut self, gameloop: u64, died: &UnitDied) {
        let key = CoreKey {
            unit_tag_index: died.unit_tag_index,
            unit_tag_recycle: died.unit_tag_recycle,
        };
        if self.alive.remove(&key) {
            let seconds =
                (gameloop as f64 - self.tick_offset as f64) / self.ticks_per_second as f64;
            self.duration_seconds = Some(seconds);
        }
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration_seconds
    }

    pub fn alive(&self) -> usize {
        self.alive.len()
    }
}
