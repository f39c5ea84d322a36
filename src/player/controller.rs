//! Playback controller
//!
//! Owns the single media engine for the lifetime of a player session,
//! translates play/pause/seek requests into engine calls, and folds engine
//! status snapshots into `PlaybackState`.
//!
//! # Teardown
//!
//! Status snapshots can still be delivered after the session ends. Every
//! snapshot passes through `on_status`, which checks the liveness flag
//! first. `teardown` clears the flag before it releases the engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::engine::{AudioSource, EngineStatus, MediaEngine};
use super::state::PlaybackState;
use super::types::{PlayerError, PlayerResult};
use crate::transcript::Timeline;

/// Shared flag that is true until teardown begins
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Playback controller for one session
pub struct PlaybackController<E: MediaEngine> {
    /// The loaded engine; None before load and after teardown
    engine: Option<E>,
    /// Shared phrase timeline
    timeline: Arc<Timeline>,
    state: PlaybackState,
    alive: Liveness,
    /// Set once teardown ran
    released: bool,
}

impl<E: MediaEngine> PlaybackController<E> {
    /// Create a controller with nothing loaded
    pub fn new(timeline: Arc<Timeline>) -> Self {
        Self {
            engine: None,
            timeline,
            state: PlaybackState::new(),
            alive: Liveness::new(),
            released: false,
        }
    }

    /// Load `source` into `engine` and take ownership of it.
    ///
    /// On success playback is paused at 0.
    pub fn load(&mut self, mut engine: E, source: &AudioSource) -> PlayerResult<()> {
        if self.released || self.engine.is_some() {
            return Err(PlayerError::NotReady);
        }

        engine.load(source).map_err(|e| {
            log::error!("Error initializing audio: {}", e);
            PlayerError::Load(e)
        })?;

        // Teardown may have started while the engine was loading
        if !self.alive.is_alive() {
            if let Err(e) = engine.unload() {
                log::warn!("Error unloading sound loaded after teardown: {}", e);
            }
            return Err(PlayerError::NotReady);
        }

        log::info!("Loaded {:?} with {} engine", source, engine.name());
        self.engine = Some(engine);
        self.state = PlaybackState::new();
        Ok(())
    }

    /// Whether an engine is loaded and the session is live
    pub fn is_ready(&self) -> bool {
        self.engine.is_some() && self.alive.is_alive()
    }

    fn engine_mut(&mut self) -> PlayerResult<&mut E> {
        if !self.alive.is_alive() {
            return Err(PlayerError::NotReady);
        }
        self.engine.as_mut().ok_or(PlayerError::NotReady)
    }

    /// Start playback
    pub fn play(&mut self) -> PlayerResult<()> {
        self.engine_mut()?.play().map_err(PlayerError::Engine)?;
        self.state.is_playing = true;
        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) -> PlayerResult<()> {
        self.engine_mut()?.pause().map_err(PlayerError::Engine)?;
        self.state.is_playing = false;
        Ok(())
    }

    /// Seek to an absolute position
    pub fn seek(&mut self, position_ms: u64) -> PlayerResult<()> {
        self.engine_mut()?
            .seek(position_ms)
            .map_err(PlayerError::Engine)?;
        self.state.current_time = if self.state.duration > 0 {
            position_ms.min(self.state.duration)
        } else {
            position_ms
        };
        Ok(())
    }

    /// Ask the engine for its live status without touching the state
    pub fn query_status(&mut self) -> PlayerResult<EngineStatus> {
        self.engine_mut()?.status().map_err(|e| {
            log::error!("Sound is not loaded: {}", e);
            PlayerError::StatusQuery(e)
        })
    }

    /// Fold a status snapshot into the state.
    ///
    /// Returns false when the snapshot arrived after teardown and was dropped.
    pub fn on_status(&mut self, status: &EngineStatus) -> bool {
        if !self.alive.is_alive() {
            log::debug!("Dropping status update after teardown");
            return false;
        }

        self.state.apply_status(status);
        if let Some(index) = self.timeline.resolve(status.position_ms) {
            self.state.current_phrase_index = index;
        }
        if status.did_just_finish {
            self.state.is_playing = false;
        }
        true
    }

    /// Query the engine and apply the snapshot
    pub fn poll(&mut self) -> PlayerResult<bool> {
        let status = self.query_status()?;
        Ok(self.on_status(&status))
    }

    /// Set the highlighted phrase
    pub fn set_phrase_index(&mut self, index: usize) {
        if self.alive.is_alive() {
            self.state.current_phrase_index = index;
        }
    }

    /// Reset position and phrase to the start in the state
    pub fn reset_to_start(&mut self) {
        if self.alive.is_alive() {
            self.state.rewind_to_start();
        }
    }

    /// End the session: clear liveness, then release the engine once.
    pub fn teardown(&mut self) -> PlayerResult<()> {
        if self.released {
            return Ok(());
        }
        self.alive.clear();
        self.released = true;
        self.state.is_playing = false;

        match self.engine.take() {
            Some(mut engine) => engine.unload().map_err(|e| {
                log::error!("Error unloading sound: {}", e);
                PlayerError::Engine(e)
            }),
            None => Ok(()),
        }
    }

    /// Whether teardown ran
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// A handle to the liveness flag
    pub fn liveness(&self) -> Liveness {
        self.alive.clone()
    }

    /// Current playback state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// The shared timeline
    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    /// The loaded engine, if any
    pub fn engine(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }
}

impl<E: MediaEngine> Drop for PlaybackController<E> {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.teardown();
        }
    }
}
