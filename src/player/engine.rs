//! Media engine interface
//!
//! The seam between the player and whatever actually decodes and outputs
//! audio. Engines own at most one loaded source at a time.

use std::path::{Path, PathBuf};

/// Error type for engine operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The audio data could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The audio asset could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// No source is loaded
    #[error("Sound is not loaded")]
    NotLoaded,

    /// The audio output device could not be opened
    #[error("Audio output error: {0}")]
    Output(String),

    /// Seeking failed
    #[error("Seek failed: {0}")]
    Seek(String),

    /// The engine thread is gone
    #[error("Audio engine disconnected")]
    Disconnected,
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// The audio asset an engine plays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// An audio file on disk
    File(PathBuf),
    /// Silence of the given length in milliseconds
    Silence(u64),
}

impl AudioSource {
    pub fn file(path: impl AsRef<Path>) -> Self {
        AudioSource::File(path.as_ref().to_path_buf())
    }
}

/// A snapshot of the engine's playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStatus {
    /// Current position in milliseconds
    pub position_ms: u64,
    /// Media duration in milliseconds (0 if unknown)
    pub duration_ms: u64,
    /// Whether the engine is currently outputting audio
    pub is_playing: bool,
    /// True exactly once after the media plays through to its end
    pub did_just_finish: bool,
}

/// Media playback engine
///
/// Every call may block while the engine does its work. Implementations
/// clamp seek targets to `[0, duration]`.
pub trait MediaEngine: Send {
    /// Returns the engine name (e.g., "rodio", "null")
    fn name(&self) -> &'static str;

    /// Load a source, replacing any loaded one. Starts paused at 0.
    fn load(&mut self, source: &AudioSource) -> EngineResult<()>;

    /// Start or resume playback
    fn play(&mut self) -> EngineResult<()>;

    /// Pause playback
    fn pause(&mut self) -> EngineResult<()>;

    /// Move to an absolute position
    fn seek(&mut self, position_ms: u64) -> EngineResult<()>;

    /// Query the current status; fails with `NotLoaded` when nothing is loaded
    fn status(&mut self) -> EngineResult<EngineStatus>;

    /// Release the loaded source
    fn unload(&mut self) -> EngineResult<()>;
}

impl<E: MediaEngine + ?Sized> MediaEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn load(&mut self, source: &AudioSource) -> EngineResult<()> {
        (**self).load(source)
    }

    fn play(&mut self) -> EngineResult<()> {
        (**self).play()
    }

    fn pause(&mut self) -> EngineResult<()> {
        (**self).pause()
    }

    fn seek(&mut self, position_ms: u64) -> EngineResult<()> {
        (**self).seek(position_ms)
    }

    fn status(&mut self) -> EngineResult<EngineStatus> {
        (**self).status()
    }

    fn unload(&mut self) -> EngineResult<()> {
        (**self).unload()
    }
}
