//! Reader for MuseScore score files
//!
//! Turns `.mscx` markup into an in-memory [`model::Score`]. Files written by
//! every format version from 1.x on are accepted; version differences are
//! resolved while reading so the model always holds current semantics.

pub mod error;
pub mod model;
pub mod read;
pub mod settings;
pub mod xml;

pub use error::ReadError;
pub use read::{read_score, read_score_file, read_score_with_layout_notify, read_score_with_settings, ReadResult};
pub use settings::ReadSettings;
