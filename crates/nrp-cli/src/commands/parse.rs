use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::error;

use nrp_config::ParserSettings;
use nrp_engine::parse_replay;
use nrp_model::MatchRecord;
use nrp_protocol::{DecoderRegistry, DirArchive};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One compact JSON record per line.
    Json,
    Pretty,
    Summary,
}

fn parse_one(path: &Path, registry: &DecoderRegistry, settings: &ParserSettings) -> Result<MatchRecord> {
    let archive = DirArchive::open(path)
        .with_context(|| format!("open replay dir: {}", path.display()))?;
    let record = parse_replay(&archive, registry, settings)?;
    Ok(record)
}

fn render(record: &MatchRecord, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string(record)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(record)?,
        OutputFormat::Summary => record.to_string(),
    };
    Ok(out)
}

/// Parse every path in parallel, then report in input order. Every path is
/// attempted; any failure makes the command fail at the end.
pub fn run(
    paths: &[PathBuf],
    registry: &DecoderRegistry,
    settings: &ParserSettings,
    format: OutputFormat,
) -> Result<()> {
    let results: Vec<(&PathBuf, Result<MatchRecord>)> = paths
        .par_iter()
        .map(|p| (p, parse_one(p, registry, settings)))
        .collect();

    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(record) => println!("{}", render(&record, format)?),
            Err(err) => {
                failed += 1;
                error!(path = %path.display(), "parse/failed");
                eprintln!("error: {}: {:#}", path.display(), err);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} replay(s) failed to parse", paths.len());
    }
    Ok(())
}
