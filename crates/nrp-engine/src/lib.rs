//! nrp-engine
//!
//! Turns decoded replay streams into a normalized [`MatchRecord`].
//!
//! Responsibilities:
//! - Version resolution and stream fetching (`parser`)
//! - Single-pass tracker interpretation (`interpreter`)
//! - Draft order reconstruction (`draft`)
//! - Match duration from core lifecycle records (`duration`)
//! - Hero resolution with the attributes fallback (`heroes`)
//! - Stable match identity (`identity`)
//! - Battletag enrichment from lobby bytes (`tags`)
//! - Final record assembly (`assembler`)
//!
//! One parse owns its state exclusively. Concurrent parses share only the
//! read-only registry and catalogs.
//!
//! [`MatchRecord`]: nrp_model::MatchRecord

pub mod assembler;
pub mod draft;
pub mod duration;
mod error;
pub mod heroes;
pub mod identity;
pub mod interpreter;
mod parser;
pub mod tags;

pub use assembler::{assemble, filetime_to_utc, MatchContext};
pub use duration::{CoreKey, DurationTracker};
pub use error::{ParseError, ParseStage, Reference};
pub use identity::compute_match_id;
pub use interpreter::{EventStreamInterpreter, InterpreterState, ParticipantState};
pub use parser::parse_replay;
