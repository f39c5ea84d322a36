//! Bilingual transcript
//!
//! Static dataset types, JSON loading, and the derived phrase timeline.

pub mod loader;
pub mod timeline;
pub mod types;

pub use loader::{load_transcript, parse_transcript, TranscriptError, TranscriptResult};
pub use timeline::{Phrase, Timeline};
pub use types::{Language, RawPhrase, Speaker, TranscriptData, Words};
