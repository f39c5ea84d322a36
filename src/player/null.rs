//! Null (silent) media engine
//!
//! Plays silence for a fixed duration. Used when no audio output is wanted
//! but the transcript still needs to advance with timing, and by tests.

use std::time::Instant;

use super::engine::{AudioSource, EngineError, EngineResult, EngineStatus, MediaEngine};

/// Duration used for file sources when none is configured (one minute)
const DEFAULT_DURATION_MS: u64 = 60_000;

/// Silent engine with a wall clock or a manual clock
#[derive(Debug)]
pub struct NullEngine {
    /// Whether a source is loaded
    loaded: bool,
    /// Duration of the loaded source
    duration_ms: u64,
    /// Duration given to file sources
    file_duration_ms: u64,
    /// Position at the last checkpoint
    position_ms: u64,
    /// Whether playback is running
    playing: bool,
    /// Wall-clock checkpoint while playing (None with a manual clock)
    resumed_at: Option<Instant>,
    /// Position only moves through `advance`
    manual_clock: bool,
    /// End reached but not yet reported through `status`
    finish_pending: bool,
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NullEngine {
    /// Create a null engine driven by the wall clock
    pub fn new() -> Self {
        Self {
            loaded: false,
            duration_ms: 0,
            file_duration_ms: DEFAULT_DURATION_MS,
            position_ms: 0,
            playing: false,
            resumed_at: None,
            manual_clock: false,
            finish_pending: false,
        }
    }

    /// Create a null engine whose position only moves through `advance`
    pub fn manual() -> Self {
        Self {
            manual_clock: true,
            ..Self::new()
        }
    }

    /// Set the duration used when a file source is loaded
    pub fn with_file_duration(mut self, duration_ms: u64) -> Self {
        self.file_duration_ms = duration_ms;
        self
    }

    /// Check if a source is loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Move the manual clock forward while playing
    pub fn advance(&mut self, delta_ms: u64) {
        if self.playing {
            self.position_ms = self.position_ms.saturating_add(delta_ms);
            self.check_end();
        }
    }

    /// Fold elapsed wall time into the position
    fn settle(&mut self) {
        if let Some(since) = self.resumed_at {
            let now = Instant::now();
            let elapsed = now.duration_since(since).as_millis() as u64;
            self.position_ms = self.position_ms.saturating_add(elapsed);
            self.resumed_at = Some(now);
        }
        self.check_end();
    }

    fn check_end(&mut self) {
        if self.playing && self.position_ms >= self.duration_ms {
            self.position_ms = self.duration_ms;
            self.playing = false;
            self.resumed_at = None;
            self.finish_pending = true;
        }
    }

    fn ensure_loaded(&self) -> EngineResult<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(EngineError::NotLoaded)
        }
    }
}

impl MediaEngine for NullEngine {
    fn name(&self) -> &'static str {
        "null"
    }

    fn load(&mut self, source: &AudioSource) -> EngineResult<()> {
        let duration_ms = match source {
            AudioSource::Silence(ms) => *ms,
            AudioSource::File(path) => {
                if !path.is_file() {
                    return Err(EngineError::Io(format!("{} not found", path.display())));
                }
                self.file_duration_ms
            }
        };

        self.loaded = true;
        self.duration_ms = duration_ms;
        self.position_ms = 0;
        self.playing = false;
        self.resumed_at = None;
        self.finish_pending = false;
        Ok(())
    }

    fn play(&mut self) -> EngineResult<()> {
        self.ensure_loaded()?;
        if !self.playing {
            self.playing = true;
            if !self.manual_clock {
                self.resumed_at = Some(Instant::now());
            }
        }
        Ok(())
    }

    fn pause(&mut self) -> EngineResult<()> {
        self.ensure_loaded()?;
        self.settle();
        self.playing = false;
        self.resumed_at = None;
        Ok(())
    }

    fn seek(&mut self, position_ms: u64) -> EngineResult<()> {
        self.ensure_loaded()?;
        self.position_ms = position_ms.min(self.duration_ms);
        if self.resumed_at.is_some() {
            self.resumed_at = Some(Instant::now());
        }
        Ok(())
    }

    fn status(&mut self) -> EngineResult<EngineStatus> {
        self.ensure_loaded()?;
        self.settle();
        let did_just_finish = std::mem::take(&mut self.finish_pending);
        Ok(EngineStatus {
            position_ms: self.position_ms,
            duration_ms: self.duration_ms,
            is_playing: self.playing,
            did_just_finish,
        })
    }

    fn unload(&mut self) -> EngineResult<()> {
        self.ensure_loaded()?;
        self.loaded = false;
        self.playing = false;
        self.resumed_at = None;
        self.position_ms = 0;
        self.duration_ms = 0;
        self.finish_pending = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(duration_ms: u64) -> NullEngine {
        let mut engine = NullEngine::manual();
        engine.load(&AudioSource::Silence(duration_ms)).unwrap();
        engine
    }

    #[test]
    fn test_unloaded_status_fails() {
        let mut engine = NullEngine::manual();
        assert_eq!(engine.status(), Err(EngineError::NotLoaded));
        assert_eq!(engine.play(), Err(EngineError::NotLoaded));
    }

    #[test]
    fn test_load_starts_paused_at_zero() {
        let mut engine = loaded(5000);
        let status = engine.status().unwrap();
        assert_eq!(status.position_ms, 0);
        assert_eq!(status.duration_ms, 5000);
        assert!(!status.is_playing);
    }

    #[test]
    fn test_advance_only_while_playing() {
        let mut engine = loaded(5000);
        engine.advance(1000);
        assert_eq!(engine.status().unwrap().position_ms, 0);

        engine.play().unwrap();
        engine.advance(1000);
        assert_eq!(engine.status().unwrap().position_ms, 1000);
    }

    #[test]
    fn test_finish_reported_once() {
        let mut engine = loaded(1000);
        engine.play().unwrap();
        engine.advance(1500);

        let first = engine.status().unwrap();
        assert!(first.did_just_finish);
        assert!(!first.is_playing);
        assert_eq!(first.position_ms, 1000);

        let second = engine.status().unwrap();
        assert!(!second.did_just_finish);
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut engine = loaded(1000);
        engine.seek(9000).unwrap();
        assert_eq!(engine.status().unwrap().position_ms, 1000);
    }

    #[test]
    fn test_play_pause_idempotent() {
        let mut engine = loaded(1000);
        engine.play().unwrap();
        engine.play().unwrap();
        assert!(engine.status().unwrap().is_playing);
        engine.pause().unwrap();
        engine.pause().unwrap();
        assert!(!engine.status().unwrap().is_playing);
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let mut engine = NullEngine::manual();
        let result = engine.load(&AudioSource::file("/nonexistent/audio.ogg"));
        assert!(matches!(result, Err(EngineError::Io(_))));
        assert!(!engine.is_loaded());
    }

    #[test]
    fn test_unload() {
        let mut engine = loaded(1000);
        engine.unload().unwrap();
        assert!(!engine.is_loaded());
        assert_eq!(engine.unload(), Err(EngineError::NotLoaded));
    }
}
