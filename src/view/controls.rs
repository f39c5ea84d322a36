//! Transport control bar
//!
//! Elapsed/total time, a display-only progress bar and the three buttons.

use crate::player::PlaybackState;

/// Format milliseconds as `m:ss`
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Progress through the media in percent (0 when the duration is unknown)
pub fn progress_percent(current_time: u64, duration: u64) -> f32 {
    if duration == 0 {
        return 0.0;
    }
    (current_time as f32 / duration as f32 * 100.0).clamp(0.0, 100.0)
}

/// What the control bar shows for a playback state
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
    pub elapsed: String,
    pub total: String,
    pub progress: f32,
    pub is_playing: bool,
}

impl ControlsView {
    pub fn from_state(state: &PlaybackState) -> Self {
        Self {
            elapsed: format_time(state.current_time),
            total: format_time(state.duration),
            progress: progress_percent(state.current_time, state.duration),
            is_playing: state.is_playing,
        }
    }

    /// Glyph for the play/pause button
    pub fn play_glyph(&self) -> &'static str {
        if self.is_playing {
            "||"
        } else {
            "|>"
        }
    }

    /// Render the control bar as three lines of the given width
    pub fn render(&self, width: usize) -> Vec<String> {
        let bar_width = width.saturating_sub(2).max(1);
        let filled = ((self.progress / 100.0) * bar_width as f32).round() as usize;
        let filled = filled.min(bar_width);
        let bar = format!("[{}{}]", "=".repeat(filled), "-".repeat(bar_width - filled));

        let gap = width.saturating_sub(self.elapsed.len() + self.total.len()).max(1);
        let times = format!("{}{}{}", self.elapsed, " ".repeat(gap), self.total);

        let buttons = format!("<<   {}   >>", self.play_glyph());
        let buttons = format!("{:^width$}", buttons, width = width)
            .trim_end()
            .to_string();

        vec![bar, times, buttons]
    }
}
