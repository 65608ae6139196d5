//! Replay archive contract.
//!
//! A replay is a container of named streams. The engine only needs to read
//! a stream's bytes by name; how the container is stored (MPQ, directory of
//! extracted files, in-memory fixtures) is an implementation detail.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Stream names inside a replay archive.
pub mod stream {
    pub const HEADER: &str = "replay.header";
    pub const DETAILS: &str = "replay.details";
    pub const INIT_DATA: &str = "replay.initData";
    pub const TRACKER_EVENTS: &str = "replay.tracker.events";
    pub const ATTRIBUTES_EVENTS: &str = "replay.attributes.events";
    pub const BATTLE_LOBBY: &str = "replay.server.battlelobby";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArchiveError {
    StreamNotFound { name: String },
    Io { name: String, detail: String },
}

impl ArchiveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StreamNotFound { .. })
    }
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamNotFound { name } => write!(f, "stream '{name}' not found in archive"),
            Self::Io { name, detail } => write!(f, "failed to read stream '{name}': {detail}"),
        }
    }
}

impl std::error::Error for ArchiveError {}

pub trait ReplayArchive {
    fn read_stream(&self, name: &str) -> Result<Vec<u8>, ArchiveError>;
}

impl<A: ReplayArchive + ?Sized> ReplayArchive for &A {
    fn read_stream(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        (**self).read_stream(name)
    }
}

// ---------------------------------------------------------------------------
// MemoryArchive
// ---------------------------------------------------------------------------

/// Streams held in memory. Used by fixtures and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryArchive {
    streams: BTreeMap<String, Vec<u8>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.streams.insert(name.into(), bytes.into());
    }

    pub fn with_stream(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.streams.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.streams.keys().map(String::as_str)
    }
}

impl ReplayArchive for MemoryArchive {
    fn read_stream(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        self.streams
            .get(name)
            .cloned()
            .ok_or_else(|| ArchiveError::StreamNotFound {
                name: name.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// DirArchive
// ---------------------------------------------------------------------------

/// A directory whose files are the archive's streams, one file per stream
/// named exactly after it.
#[derive(Clone, Debug)]
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }
}

impl ReplayArchive for DirArchive {
    fn read_stream(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        std::fs::read(self.root.join(name)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ArchiveError::StreamNotFound {
                name: name.to_string(),
            },
            _ => ArchiveError::Io {
                name: name.to_string(),
                detail: e.to_string(),
            },
        })
    }
}
