//! Replay parse orchestration.
//!
//! header (newest decoder) -> resolve decoder by base build -> roster ->
//! init data -> single tracker pass -> hero fallback -> assemble.

use tracing::{debug, info, warn};

use nrp_config::ParserSettings;
use nrp_model::{GameMode, MatchRecord};
use nrp_protocol::{stream, DecoderRegistry, ReplayArchive};

use crate::assembler::{assemble, filetime_to_utc, MatchContext};
use crate::error::{ParseError, ParseStage};
use crate::heroes;
use crate::interpreter::{EventStreamInterpreter, InterpreterState};
use crate::tags;

fn read_required<A: ReplayArchive + ?Sized>(
    archive: &A,
    name: &str,
    stage: ParseStage,
) -> Result<Vec<u8>, ParseError> {
    archive
        .read_stream(name)
        .map_err(|e| ParseError::archive(stage, e))
}

/// Absent optional streams disable their feature; other archive errors
/// are still fatal.
fn read_optional<A: ReplayArchive + ?Sized>(
    archive: &A,
    name: &str,
    stage: ParseStage,
) -> Result<Option<Vec<u8>>, ParseError> {
    match archive.read_stream(name) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.is_not_found() => {
            warn!(stream = name, "stream/optional missing");
            Ok(None)
        }
        Err(e) => Err(ParseError::archive(stage, e)),
    }
}

/// Parse one replay into a [`MatchRecord`].
///
/// Fails atomically: on error no partial record is returned.
pub fn parse_replay<A: ReplayArchive + ?Sized>(
    archive: &A,
    registry: &DecoderRegistry,
    settings: &ParserSettings,
) -> Result<MatchRecord, ParseError> {
    // Header layout is stable across builds; read it with the newest decoder.
    let latest = registry
        .latest()
        .map_err(|_| ParseError::NoDecoderAvailable { requested: None })?;
    let header_bytes = read_required(archive, stream::HEADER, ParseStage::Header)?;
    let header = latest
        .decode_header(&header_bytes)
        .map_err(|source| ParseError::Decode {
            stage: ParseStage::Header,
            source,
        })?;

    let base_build = header.version.base_build;
    let resolution = registry
        .resolve(base_build)
        .map_err(|_| ParseError::NoDecoderAvailable {
            requested: Some(base_build),
        })?;
    if resolution.is_fallback() {
        warn!(
            base_build,
            resolved = resolution.base_build(),
            "decoder/fallback"
        );
    }
    let decoder = resolution.decoder;
    info!(base_build, version = %header.version, "parse/start");

    // Roster
    let details_bytes = read_required(archive, stream::DETAILS, ParseStage::Roster)?;
    let details = decoder
        .decode_details(&details_bytes)
        .map_err(|source| ParseError::Decode {
            stage: ParseStage::Roster,
            source,
        })?;
    let timestamp = filetime_to_utc(details.time_utc)?;
    let mut state = InterpreterState::from_roster(&details, settings)?;

    if settings.battletags {
        if let Some(lobby) = read_optional(archive, stream::BATTLE_LOBBY, ParseStage::Roster)? {
            for p in state.participants.iter_mut().filter(|p| !p.computer) {
                p.battletag = tags::battletag(&lobby, &p.display_name);
            }
        }
    }

    // Init data
    let init_bytes = read_required(archive, stream::INIT_DATA, ParseStage::InitData)?;
    let init = decoder
        .decode_initdata(&init_bytes)
        .map_err(|source| ParseError::Decode {
            stage: ParseStage::InitData,
            source,
        })?;
    let game_mode = GameMode::from_amm_id(init.amm_id);

    // Tracker events
    let tracker_bytes = read_required(archive, stream::TRACKER_EVENTS, ParseStage::TrackerEvents)?;
    let mut interpreter = EventStreamInterpreter::new(state);
    let records = interpreter.run(decoder.decode_tracker_events(&tracker_bytes))?;
    debug!(records, "tracker/done");
    let mut state = interpreter.into_state();

    // Hero fallback
    if heroes::needs_attribute_fallback(&state, game_mode, settings) {
        match read_optional(archive, stream::ATTRIBUTES_EVENTS, ParseStage::Attributes)? {
            Some(bytes) => {
                let attributes =
                    decoder
                        .decode_attributes(&bytes)
                        .map_err(|source| ParseError::Decode {
                            stage: ParseStage::Attributes,
                            source,
                        })?;
                let resolved =
                    heroes::apply_attribute_fallback(&mut state, &attributes, settings.attribute_id)?;
                debug!(resolved, "hero/fallback applied");
            }
            None => warn!("hero/fallback unavailable"),
        }
    }
    heroes::report_unresolved(&state);

    let record = assemble(
        state,
        MatchContext {
            version: header.version,
            game_mode,
            timestamp,
            seed: init.random_value,
        },
    );
    info!(
        id = %record.id,
        mode = %record.game_mode,
        participants = record.participant_count(),
        duration = ?record.duration_seconds,
        "parse/done"
    );
    Ok(record)
}
