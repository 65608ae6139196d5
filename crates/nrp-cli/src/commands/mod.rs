//! Command handler modules for nrp-cli.
//!
//! Shared setup (config layering, decoder registry) lives here.

pub mod parse;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use nrp_config::{report_unused_keys, ParserSettings, UnusedKeyPolicy};
use nrp_protocol::{DecoderRegistry, DumpDecoder};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Layer the given YAML files and extract typed settings. No paths means
/// defaults everywhere.
pub fn load_settings(config_paths: &[PathBuf], strict: bool) -> Result<ParserSettings> {
    if config_paths.is_empty() {
        return Ok(ParserSettings::default());
    }

    let loaded = nrp_config::load_layered_yaml(config_paths)?;
    let policy = if strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(&loaded.config_json, policy)?;
    for pointer in &report.unused_leaf_pointers {
        warn!(pointer = %pointer, "config/unused key");
    }
    info!(config_hash = %loaded.config_hash, "config/loaded");

    ParserSettings::from_config_json(&loaded.config_json).context("invalid parser settings")
}

/// One dump decoder per configured base build.
pub fn build_registry(settings: &ParserSettings) -> Result<DecoderRegistry> {
    let mut registry = DecoderRegistry::new();
    for &build in &settings.decoder_builds {
        registry
            .register(Arc::new(DumpDecoder::new(build)))
            .with_context(|| format!("register decoder for base build {build}"))?;
    }
    Ok(registry)
}
