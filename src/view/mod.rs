//! Presentation
//!
//! View models for the header, transcript list and control bar, and a
//! plain-text renderer that lays them out for a terminal.

pub mod controls;
pub mod header;
pub mod render;
pub mod transcript;

pub use controls::{format_time, progress_percent, ControlsView};
pub use header::{FlagTarget, HeaderView};
pub use render::TextRenderer;
pub use transcript::{PhraseRow, RowLayout, TranscriptView};

/// Error type for view operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A row has not been laid out yet, or the viewport is unmeasured
    #[error("Layout of row {0} is not measured")]
    LayoutMeasurement(usize),
}
