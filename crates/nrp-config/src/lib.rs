//! nrp-config
//!
//! Layered YAML configuration for the replay parser.
//!
//! - YAML docs are merged in order: earlier docs are the base, later docs override.
//! - The merged document is canonicalised (keys sorted) and hashed with SHA-256
//!   so two runs can prove they used the same settings.
//! - [`ParserSettings`] reads typed values out of the merged JSON by pointer.
//! - [`report_unused_keys`] flags leaves no reader consumes.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

mod consumption;
mod settings;

pub use consumption::{report_unused_keys, UnusedKeyPolicy, UnusedKeyReport, CONSUMED_POINTERS};
pub use settings::ParserSettings;

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

/// Read and layer YAML files in merge order.
pub fn load_layered_yaml<P: AsRef<Path>>(paths: &[P]) -> Result<LoadedConfig> {
    let docs = paths
        .iter()
        .map(|p| {
            let p = p.as_ref();
            fs::read_to_string(p)
                .with_context(|| format!("failed to read yaml path: {}", p.display()))
        })
        .collect::<Result<Vec<String>>>()?;

    let refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (layer, raw) in yaml_docs.iter().enumerate() {
        let doc: serde_yaml::Value = serde_yaml::from_str(raw)
            .with_context(|| format!("invalid yaml (layer {layer})"))?;
        let doc = serde_json::to_value(doc)
            .with_context(|| format!("yaml layer {layer} is not representable as json"))?;
        // Empty documents parse as null.
        if !doc.is_null() {
            merge_into(&mut merged, doc);
        }
    }

    let canonical_json = canonicalize_json(&merged)?;
    Ok(LoadedConfig {
        config_hash: sha256_hex(canonical_json.as_bytes()),
        canonical_json,
        config_json: merged,
    })
}

/// Maps merge key by key; anything else in `overlay` replaces `base`.
fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_into(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json's default Map is ordered by key, so compact serialization
    // is already canonical.
    serde_json::to_string(v).context("canonical json serialize failed")
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
