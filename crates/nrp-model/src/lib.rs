//! nrp-model
//!
//! Normalized match model shared by the decoder boundary and the engine.
//!
//! Contents:
//! - Closed catalogs: heroes, roles, battlegrounds, game modes
//! - Two-sided containers (`Team`, `PerSide`)
//! - Protocol version identity
//! - Draft actions and the reconstructed draft
//! - The final `MatchRecord`
//!
//! Pure data. No IO. Catalog lookup tables are immutable and shared
//! read-only across concurrent parses.

mod battleground;
mod draft;
mod game_mode;
mod hero;
mod record;
mod team;
mod version;

pub use battleground::Battleground;
pub use draft::{Draft, DraftAction, DraftActionKind, DraftState, DraftStep};
pub use game_mode::GameMode;
pub use hero::{Hero, Role};
pub use record::{MatchRecord, ParticipantRecord};
pub use team::{PerSide, Team};
pub use version::Version;
