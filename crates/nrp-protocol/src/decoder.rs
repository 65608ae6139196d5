//! Decoder contract.
//!
//! A decoder turns the raw bytes of one named stream into typed records for
//! one protocol layout. Implementations must be `Send + Sync` so a single
//! registry can be shared by concurrent parses.

use std::fmt;

use crate::attributes::AttributeEvents;
use crate::records::{InitData, ReplayDetails, ReplayHeader, TrackerEvent};

/// Lazy, ordered sequence of tracker records borrowed from the stream bytes.
pub type TrackerEvents<'a> = Box<dyn Iterator<Item = Result<TrackerEvent, DecodeError>> + 'a>;

/// A stream's bytes could not be decoded under this layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    /// Which record was being decoded (e.g. `"details"`, `"tracker event #12"`).
    pub what: String,
    pub detail: String,
}

impl DecodeError {
    pub fn new(what: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to decode {}: {}", self.what, self.detail)
    }
}

impl std::error::Error for DecodeError {}

/// Version-specific stream decoder.
pub trait ProtocolDecoder: Send + Sync {
    /// Base build whose record layout this decoder understands.
    fn base_build(&self) -> u32;

    fn decode_header(&self, bytes: &[u8]) -> Result<ReplayHeader, DecodeError>;

    fn decode_details(&self, bytes: &[u8]) -> Result<ReplayDetails, DecodeError>;

    fn decode_initdata(&self, bytes: &[u8]) -> Result<InitData, DecodeError>;

    /// Records are yielded in stream order. Decoding is lazy: an error is
    /// reported at the record where it occurs.
    fn decode_tracker_events<'a>(&self, bytes: &'a [u8]) -> TrackerEvents<'a>;

    fn decode_attributes(&self, bytes: &[u8]) -> Result<AttributeEvents, DecodeError>;
}
