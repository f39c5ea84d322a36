//! Transport controls
//!
//! Play/pause, rewind, forward and direct phrase navigation. The only state
//! is `PlaybackState::is_playing`; rewind and forward work from the engine's
//! live position rather than the last polled one.

use super::controller::PlaybackController;
use super::engine::MediaEngine;
use super::types::{PlayerError, PlayerResult, SeekTarget, TransportState, REWIND_THRESHOLD_MS};

/// Transport logic over a playback controller
#[derive(Debug, Clone, Copy)]
pub struct Transport {
    /// How far into a phrase rewind restarts it instead of going back one
    rewind_threshold_ms: u64,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        Self {
            rewind_threshold_ms: REWIND_THRESHOLD_MS,
        }
    }

    pub fn with_rewind_threshold(rewind_threshold_ms: u64) -> Self {
        Self {
            rewind_threshold_ms,
        }
    }

    pub fn rewind_threshold_ms(&self) -> u64 {
        self.rewind_threshold_ms
    }

    /// Toggle between playing and paused.
    ///
    /// Resuming after playback ran to the end starts over from phrase 0.
    pub fn toggle_play<E: MediaEngine>(
        &self,
        controller: &mut PlaybackController<E>,
    ) -> PlayerResult<TransportState> {
        if !controller.is_ready() {
            return Err(PlayerError::NotReady);
        }

        if controller.state().is_playing {
            controller.pause()?;
            return Ok(TransportState::Paused);
        }

        if controller.state().is_at_end() {
            controller.seek(0)?;
            controller.reset_to_start();
        }
        controller.play()?;
        Ok(TransportState::Playing)
    }

    /// Restart the current phrase, or go to the previous one when within
    /// the first second of it.
    pub fn rewind<E: MediaEngine>(
        &self,
        controller: &mut PlaybackController<E>,
    ) -> PlayerResult<SeekTarget> {
        let position = self.live_position(controller)?;
        let timeline = controller.timeline().clone();

        let Some(index) = timeline.resolve(position) else {
            return self.seek_to_start(controller);
        };

        let phrase = &timeline.phrases()[index];
        let into_phrase = position - phrase.start_time;
        let target = if into_phrase > self.rewind_threshold_ms {
            index
        } else {
            timeline.previous_index(index)
        };
        self.seek_to_phrase(controller, target)
    }

    /// Go to the next phrase, wrapping to the first after the last one
    pub fn forward<E: MediaEngine>(
        &self,
        controller: &mut PlaybackController<E>,
    ) -> PlayerResult<SeekTarget> {
        let position = self.live_position(controller)?;
        let timeline = controller.timeline().clone();

        match timeline.resolve(position) {
            Some(index) => self.seek_to_phrase(controller, timeline.next_index(index)),
            None => self.seek_to_start(controller),
        }
    }

    /// Jump to a phrase and start playing it
    pub fn tap_phrase<E: MediaEngine>(
        &self,
        controller: &mut PlaybackController<E>,
        index: usize,
    ) -> PlayerResult<SeekTarget> {
        if !controller.is_ready() {
            return Err(PlayerError::NotReady);
        }
        let target = self.seek_to_phrase(controller, index)?;
        controller.play()?;
        Ok(target)
    }

    fn live_position<E: MediaEngine>(
        &self,
        controller: &mut PlaybackController<E>,
    ) -> PlayerResult<u64> {
        if !controller.is_ready() {
            return Err(PlayerError::NotReady);
        }
        if controller.timeline().is_empty() {
            return Err(PlayerError::EmptyTimeline);
        }
        Ok(controller.query_status()?.position_ms)
    }

    fn seek_to_start<E: MediaEngine>(
        &self,
        controller: &mut PlaybackController<E>,
    ) -> PlayerResult<SeekTarget> {
        controller.seek(0)?;
        controller.set_phrase_index(0);
        Ok(SeekTarget {
            index: 0,
            position_ms: 0,
        })
    }

    fn seek_to_phrase<E: MediaEngine>(
        &self,
        controller: &mut PlaybackController<E>,
        index: usize,
    ) -> PlayerResult<SeekTarget> {
        let start = controller
            .timeline()
            .get(index)
            .map(|p| p.start_time)
            .ok_or(PlayerError::PhraseOutOfRange(index))?;
        controller.seek(start)?;
        controller.set_phrase_index(index);
        Ok(SeekTarget {
            index,
            position_ms: start,
        })
    }
}
