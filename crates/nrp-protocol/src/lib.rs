//! nrp-protocol
//!
//! Decoder boundary for replay streams.
//!
//! This crate owns:
//! - the typed records the engine reads (`records`)
//! - the `ProtocolDecoder` contract and the version-keyed `DecoderRegistry`
//! - the `ReplayArchive` contract for fetching named streams
//! - `DumpDecoder`, a decoder for JSON dumps of already-decoded streams
//!
//! It does **not** interpret records. That is `nrp-engine`.

pub mod archive;
pub mod attributes;
pub mod decoder;
pub mod dump;
pub mod records;
pub mod registry;

pub use archive::{stream, ArchiveError, DirArchive, MemoryArchive, ReplayArchive};
pub use attributes::{AttributeError, AttributeEvents, AttributeValue};
pub use decoder::{DecodeError, ProtocolDecoder, TrackerEvents};
pub use dump::DumpDecoder;
pub use records::*;
pub use registry::{DecoderRegistry, RegistryError, Resolution};
