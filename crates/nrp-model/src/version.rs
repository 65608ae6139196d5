use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol version read from the replay header. Immutable once read.
///
/// `base_build` selects the decoder layout; the remaining fields are the
/// client version the match was played on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub base_build: u32,
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
    pub build: u32,
    pub flags: Option<u32>,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.revision, self.build
        )
    }
}
