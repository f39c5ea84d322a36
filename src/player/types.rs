//! Core types for the player

use super::engine::EngineError;

/// Error type for player operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// The media asset failed to load
    #[error("Failed to load audio: {0}")]
    Load(#[source] EngineError),

    /// No media is loaded, or the player was torn down
    #[error("Player not ready")]
    NotReady,

    /// The engine could not report its status
    #[error("Status query failed: {0}")]
    StatusQuery(#[source] EngineError),

    /// A play, pause or seek request failed in the engine
    #[error("Audio engine error: {0}")]
    Engine(#[source] EngineError),

    /// No phrase at this index
    #[error("Invalid phrase index: {0}")]
    PhraseOutOfRange(usize),

    /// The timeline has no phrases to navigate
    #[error("Transcript has no phrases")]
    EmptyTimeline,
}

/// Result type for player operations
pub type PlayerResult<T> = Result<T, PlayerError>;

/// Transport state; `Paused` initially
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Paused,
    Playing,
}

impl From<bool> for TransportState {
    fn from(is_playing: bool) -> Self {
        if is_playing {
            TransportState::Playing
        } else {
            TransportState::Paused
        }
    }
}

/// Where a navigation action moved playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekTarget {
    /// Phrase index now highlighted
    pub index: usize,
    /// Position sought to, in milliseconds
    pub position_ms: u64,
}

/// Threshold past which rewind restarts the current phrase instead of
/// going to the previous one (one second)
pub const REWIND_THRESHOLD_MS: u64 = 1000;
