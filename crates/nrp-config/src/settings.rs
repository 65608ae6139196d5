use anyhow::{anyhow, bail, Context, Result};
use nrp_model::GameMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Typed parser settings read from merged config JSON.
///
/// Every key is optional; absent keys take the value [`Default`] gives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserSettings {
    /// Ticks elapsed before the match clock starts.
    pub tick_offset: u64,
    pub ticks_per_second: u64,
    /// Unit type whose death ends the match.
    pub core_unit_type: String,
    /// Attribute slot holding the hero short code.
    pub attribute_id: u32,
    /// Modes in which the attributes hero fallback never runs.
    pub fallback_excluded_modes: Vec<GameMode>,
    pub battletags: bool,
    /// Base builds the dump decoder is registered under.
    pub decoder_builds: Vec<u32>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            tick_offset: 610,
            ticks_per_second: 16,
            core_unit_type: "KingsCore".to_string(),
            attribute_id: 4002,
            fallback_excluded_modes: vec![GameMode::Aram, GameMode::Brawl],
            battletags: true,
            decoder_builds: vec![96370],
        }
    }
}

fn optional_u64(cfg: &Value, ptr: &str) -> Result<Option<u64>> {
    match cfg.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| anyhow!("config {ptr} must be a non-negative integer (got {v})")),
    }
}

fn optional_u32(cfg: &Value, ptr: &str) -> Result<Option<u32>> {
    optional_u64(cfg, ptr)?
        .map(|n| u32::try_from(n).with_context(|| format!("config {ptr} out of range: {n}")))
        .transpose()
}

fn optional_array<'a>(cfg: &'a Value, ptr: &str) -> Result<Option<&'a Vec<Value>>> {
    match cfg.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_array()
            .map(Some)
            .ok_or_else(|| anyhow!("config {ptr} must be a list (got {v})")),
    }
}

impl ParserSettings {
    /// Build from merged config JSON (produced by `load_layered_yaml*`).
    ///
    /// Keys:
    /// - duration.tick_offset (610), duration.ticks_per_second (16, non-zero),
    ///   duration.core_unit_type ("KingsCore")
    /// - heroes.attribute_id (4002), heroes.fallback_excluded_modes (["ARAM", "Brawl"])
    /// - enrichment.battletags (true)
    /// - decoders.builds ([96370], non-empty)
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let mut s = Self::default();

        if let Some(n) = optional_u64(cfg, "/duration/tick_offset")? {
            s.tick_offset = n;
        }
        if let Some(n) = optional_u64(cfg, "/duration/ticks_per_second")? {
            if n == 0 {
                bail!("config /duration/ticks_per_second must be > 0");
            }
            s.ticks_per_second = n;
        }
        if let Some(v) = cfg.pointer("/duration/core_unit_type") {
            let name = v
                .as_str()
                .ok_or_else(|| anyhow!("config /duration/core_unit_type must be a string"))?;
            if name.trim().is_empty() {
                bail!("config /duration/core_unit_type must not be empty");
            }
            s.core_unit_type = name.to_string();
        }

        if let Some(n) = optional_u32(cfg, "/heroes/attribute_id")? {
            s.attribute_id = n;
        }
        if let Some(modes) = optional_array(cfg, "/heroes/fallback_excluded_modes")? {
            s.fallback_excluded_modes = modes
                .iter()
                .map(|m| {
                    let name = m.as_str().ok_or_else(|| {
                        anyhow!("config /heroes/fallback_excluded_modes entries must be strings")
                    })?;
                    GameMode::parse(name).ok_or_else(|| {
                        anyhow!("config /heroes/fallback_excluded_modes: unknown game mode '{name}'")
                    })
                })
                .collect::<Result<_>>()?;
        }

        if let Some(v) = cfg.pointer("/enrichment/battletags") {
            s.battletags = v
                .as_bool()
                .ok_or_else(|| anyhow!("config /enrichment/battletags must be a bool"))?;
        }

        if let Some(builds) = optional_array(cfg, "/decoders/builds")? {
            s.decoder_builds = builds
                .iter()
                .map(|b| {
                    b.as_u64()
                        .and_then(|n| u32::try_from(n).ok())
                        .ok_or_else(|| anyhow!("config /decoders/builds entries must be base builds (got {b})"))
                })
                .collect::<Result<_>>()?;
            if s.decoder_builds.is_empty() {
                bail!("config /decoders/builds must name at least one base build");
            }
        }

        Ok(s)
    }

    /// Convert a tick count to seconds since the match clock started.
    pub fn ticks_to_seconds(&self, tick: u64) -> f64 {
        (tick as f64 - self.tick_offset as f64) / self.ticks_per_second as f64
    }

    pub fn fallback_allowed(&self, mode: GameMode) -> bool {
        !self.fallback_excluded_modes.contains(&mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_config_gives_defaults() {
        let s = ParserSettings::from_config_json(&json!({})).unwrap();
        assert_eq!(s, ParserSettings::default());
        assert_eq!(s.ticks_to_seconds(2610), 125.0);
        assert!(!s.fallback_allowed(GameMode::Aram));
        assert!(!s.fallback_allowed(GameMode::Brawl));
        assert!(s.fallback_allowed(GameMode::StormLeague));
    }

    #[test]
    fn overrides_are_typed() {
        let cfg = json!({
            "duration": {"tick_offset": 0, "ticks_per_second": 8, "core_unit_type": "TownHall"},
            "heroes": {"attribute_id": 4010, "fallback_excluded_modes": ["aram"]},
            "enrichment": {"battletags": false},
            "decoders": {"builds": [79033, 96370]}
        });
        let s = ParserSettings::from_config_json(&cfg).unwrap();
        assert_eq!(s.ticks_to_seconds(80), 10.0);
        assert_eq!(s.core_unit_type, "TownHall");
        assert_eq!(s.attribute_id, 4010);
        assert_eq!(s.fallback_excluded_modes, vec![GameMode::Aram]);
        assert!(!s.battletags);
        assert_eq!(s.decoder_builds, vec![79033, 96370]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad = [
            json!({"duration": {"ticks_per_second": 0}}),
            json!({"duration": {"tick_offset": -5}}),
            json!({"heroes": {"fallback_excluded_modes": ["Deathmatch"]}}),
            json!({"heroes": {"attribute_id": 5000000000u64}}),
            json!({"enrichment": {"battletags": "yes"}}),
            json!({"decoders": {"builds": []}}),
            json!({"decoders": {"builds": "96370"}}),
        ];
        for cfg in bad {
            assert!(
                ParserSettings::from_config_json(&cfg).is_err(),
                "expected rejection for {cfg}"
            );
        }
    }
}
