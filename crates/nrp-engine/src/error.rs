use std::fmt;

use nrp_protocol::{ArchiveError, AttributeError, DecodeError};

/// Where in the parse a failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseStage {
    Header,
    Roster,
    InitData,
    TrackerEvents,
    Attributes,
    Assembly,
}

impl ParseStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStage::Header => "header",
            ParseStage::Roster => "roster",
            ParseStage::InitData => "init-data",
            ParseStage::TrackerEvents => "tracker-events",
            ParseStage::Attributes => "attributes",
            ParseStage::Assembly => "assembly",
        }
    }
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identifier a record pointed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    WorkingSetSlot(u32),
    TrackerId(u32),
    ToonHandle(String),
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::WorkingSetSlot(slot) => write!(f, "working-set slot {slot}"),
            Reference::TrackerId(id) => write!(f, "tracker id {id}"),
            Reference::ToonHandle(handle) => write!(f, "toon handle '{handle}'"),
        }
    }
}

/// Fatal parse failure. No partial record is produced alongside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    NoDecoderAvailable {
        requested: Option<u32>,
    },
    /// A required stream is absent from the archive.
    StreamNotFound {
        stage: ParseStage,
        stream: String,
    },
    Archive {
        stage: ParseStage,
        source: ArchiveError,
    },
    Decode {
        stage: ParseStage,
        source: DecodeError,
    },
    DanglingReference {
        stage: ParseStage,
        reference: Reference,
    },
    UnknownHero {
        stage: ParseStage,
        name: String,
    },
    MalformedRecord {
        stage: ParseStage,
        detail: String,
    },
    MissingAttribute {
        stage: ParseStage,
        source: AttributeError,
    },
}

impl ParseError {
    pub fn stage(&self) -> Option<ParseStage> {
        match self {
            ParseError::NoDecoderAvailable { .. } => None,
            ParseError::StreamNotFound { stage, .. }
            | ParseError::Archive { stage, .. }
            | ParseError::Decode { stage, .. }
            | ParseError::DanglingReference { stage, .. }
            | ParseError::UnknownHero { stage, .. }
            | ParseError::MalformedRecord { stage, .. }
            | ParseError::MissingAttribute { stage, .. } => Some(*stage),
        }
    }

    pub(crate) fn archive(stage: ParseStage, err: ArchiveError) -> Self {
        match err {
            ArchiveError::StreamNotFound { name } => ParseError::StreamNotFound {
                stage,
                stream: name,
            },
            other => ParseError::Archive {
                stage,
                source: other,
            },
        }
    }

    pub(crate) fn malformed(stage: ParseStage, detail: impl Into<String>) -> Self {
        ParseError::MalformedRecord {
            stage,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoDecoderAvailable {
                requested: Some(build),
            } => write!(f, "no decoder available for base build {build}"),
            ParseError::NoDecoderAvailable { requested: None } => {
                write!(f, "no decoder available")
            }
            ParseError::StreamNotFound { stage, stream } => {
                write!(f, "[{stage}] required stream '{stream}' not found")
            }
            ParseError::Archive { stage, source } => write!(f, "[{stage}] {source}"),
            ParseError::Decode { stage, source } => write!(f, "[{stage}] {source}"),
            ParseError::DanglingReference { stage, reference } => {
                write!(f, "[{stage}] dangling reference to {reference}")
            }
            ParseError::UnknownHero { stage, name } => {
                write!(f, "[{stage}] unknown hero '{name}'")
            }
            ParseError::MalformedRecord { stage, detail } => {
                write!(f, "[{stage}] malformed record: {detail}")
            }
            ParseError::MissingAttribute { stage, source } => write!(f, "[{stage}] {source}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Archive { source, .. } => Some(source),
            ParseError::Decode { source, .. } => Some(source),
            ParseError::MissingAttribute { source, .. } => Some(source),
            _ => None,
        }
    }
}
