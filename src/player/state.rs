//! Playback state shared with the presentation layer

use super::engine::EngineStatus;

/// Observable playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    /// Last reported position in milliseconds
    pub current_time: u64,
    /// Last reported media duration in milliseconds
    pub duration: u64,
    /// Whether the user wants playback running
    pub is_playing: bool,
    /// Index of the highlighted phrase
    pub current_phrase_index: usize,
}

impl PlaybackState {
    /// Create the initial state: paused at 0 on the first phrase
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether playback has run to the end of the media.
    ///
    /// Never true while the duration is unknown (0).
    pub fn is_at_end(&self) -> bool {
        self.duration > 0 && self.current_time >= self.duration
    }

    /// Take position and duration from an engine snapshot
    pub fn apply_status(&mut self, status: &EngineStatus) {
        self.current_time = status.position_ms;
        self.duration = status.duration_ms;
    }

    /// Back to the first phrase at time 0
    pub fn rewind_to_start(&mut self) {
        self.current_time = 0;
        self.current_phrase_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = PlaybackState::new();
        assert_eq!(state.current_time, 0);
        assert_eq!(state.duration, 0);
        assert!(!state.is_playing);
        assert_eq!(state.current_phrase_index, 0);
    }

    #[test]
    fn test_is_at_end() {
        let mut state = PlaybackState::new();
        assert!(!state.is_at_end());
        state.duration = 1000;
        state.current_time = 999;
        assert!(!state.is_at_end());
        state.current_time = 1000;
        assert!(state.is_at_end());
    }

    #[test]
    fn test_apply_status() {
        let mut state = PlaybackState::new();
        state.apply_status(&EngineStatus {
            position_ms: 1200,
            duration_ms: 9000,
            is_playing: true,
            did_just_finish: false,
        });
        assert_eq!(state.current_time, 1200);
        assert_eq!(state.duration, 9000);
        assert!(!state.is_playing);
    }
}
