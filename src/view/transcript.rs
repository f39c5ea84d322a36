//! Scrollable transcript list
//!
//! Builds the rows for the current language and keeps the scroll geometry:
//! auto-scroll to the current phrase and the top/bottom fade indicators.
//! Heights and offsets are in rendered lines.

use std::sync::Arc;

use super::ViewError;
use crate::language::LanguageSelection;
use crate::transcript::{Language, Timeline};

/// One rendered phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRow<'a> {
    pub index: usize,
    pub speaker: &'a str,
    pub primary: Language,
    pub primary_text: &'a str,
    pub secondary: Language,
    pub secondary_text: &'a str,
    pub is_current: bool,
}

/// Measured position of a row inside the scroll content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub y: usize,
    pub height: usize,
}

/// Transcript list state
#[derive(Debug)]
pub struct TranscriptView {
    timeline: Arc<Timeline>,
    selection: LanguageSelection,
    /// Row layouts as last measured by the renderer
    layouts: Vec<Option<RowLayout>>,
    content_height: usize,
    viewport_height: usize,
    offset: usize,
    show_top_fade: bool,
    show_bottom_fade: bool,
}

impl TranscriptView {
    pub fn new(timeline: Arc<Timeline>, selection: LanguageSelection) -> Self {
        let count = timeline.len();
        Self {
            timeline,
            selection,
            layouts: vec![None; count],
            content_height: 0,
            viewport_height: 0,
            offset: 0,
            show_top_fade: false,
            show_bottom_fade: true,
        }
    }

    /// Rows for every phrase, `current` emphasized
    pub fn rows(&self, current: usize) -> Vec<PhraseRow<'_>> {
        let primary = self.selection.get();
        let secondary = primary.other();
        self.timeline
            .phrases()
            .iter()
            .enumerate()
            .map(|(index, phrase)| PhraseRow {
                index,
                speaker: &phrase.speaker,
                primary,
                primary_text: phrase.text(primary),
                secondary,
                secondary_text: phrase.text(secondary),
                is_current: index == current,
            })
            .collect()
    }

    /// Record where a row was laid out
    pub fn set_row_layout(&mut self, index: usize, layout: RowLayout) {
        if let Some(slot) = self.layouts.get_mut(index) {
            *slot = Some(layout);
        }
    }

    /// Record content and viewport heights
    pub fn set_geometry(&mut self, content_height: usize, viewport_height: usize) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.set_offset(self.offset);
    }

    /// Scroll offset that centers row `index`, clamped to the content
    pub fn autoscroll_target(&self, index: usize) -> Result<usize, ViewError> {
        let layout = self
            .layouts
            .get(index)
            .copied()
            .flatten()
            .ok_or(ViewError::LayoutMeasurement(index))?;
        if self.viewport_height == 0 || self.content_height == 0 {
            return Err(ViewError::LayoutMeasurement(index));
        }

        let center = (layout.y + layout.height / 2) as i64 - (self.viewport_height / 2) as i64;
        let max_scroll = self.max_offset() as i64;
        Ok(center.clamp(0, max_scroll) as usize)
    }

    /// Scroll so row `index` is centered
    pub fn scroll_to(&mut self, index: usize) -> Result<usize, ViewError> {
        let target = self.autoscroll_target(index)?;
        self.set_offset(target);
        Ok(target)
    }

    /// Scroll by a number of lines, as a user would
    pub fn scroll_by(&mut self, delta: isize) {
        let next = (self.offset as isize + delta).max(0) as usize;
        self.set_offset(next);
    }

    /// Apply a scroll offset and update the fades
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
        self.show_top_fade = self.offset > 0;
        self.show_bottom_fade = self.offset + self.viewport_height < self.content_height;
    }

    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Validate a tapped row
    pub fn tap(&self, index: usize) -> Option<usize> {
        (index < self.timeline.len()).then_some(index)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    pub fn show_top_fade(&self) -> bool {
        self.show_top_fade
    }

    pub fn show_bottom_fade(&self) -> bool {
        self.show_bottom_fade
    }

    pub fn language(&self) -> Language {
        self.selection.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{RawPhrase, Speaker, TranscriptData};

    fn view() -> TranscriptView {
        let data = TranscriptData::new(
            0,
            vec![
                Speaker::new(
                    "John",
                    vec![
                        RawPhrase::new("Hello", "Hola", 1000),
                        RawPhrase::new("Bye", "Adiós", 1000),
                    ],
                ),
                Speaker::new("Maria", vec![RawPhrase::new("Hi", "Buenas", 1000)]),
            ],
        );
        TranscriptView::new(
            Arc::new(Timeline::build(&data)),
            LanguageSelection::default(),
        )
    }

    fn measured() -> TranscriptView {
        let mut v = view();
        for i in 0..3 {
            v.set_row_layout(i, RowLayout { y: i * 10, height: 10 });
        }
        v.set_geometry(30, 10);
        v
    }

    #[test]
    fn test_rows_follow_language() {
        let v = view();
        let rows = v.rows(1);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].speaker, "Maria");
        assert_eq!(rows[1].primary_text, "Hi");
        assert_eq!(rows[1].secondary_text, "Buenas");
        assert!(rows[1].is_current);
        assert!(!rows[0].is_current);

        v.selection.select(Language::Es);
        let rows = v.rows(1);
        assert_eq!(rows[0].primary, Language::Es);
        assert_eq!(rows[0].primary_text, "Hola");
        assert_eq!(rows[0].secondary_text, "Hello");
    }

    #[test]
    fn test_autoscroll_centers_and_clamps() {
        let v = measured();
        assert_eq!(v.autoscroll_target(0), Ok(0));
        assert_eq!(v.autoscroll_target(1), Ok(10));
        assert_eq!(v.autoscroll_target(2), Ok(20));
    }

    #[test]
    fn test_autoscroll_clamps_to_content_end() {
        let mut v = measured();
        v.set_geometry(30, 20);
        assert_eq!(v.autoscroll_target(2), Ok(10));
    }

    #[test]
    fn test_autoscroll_unmeasured_is_error() {
        let v = view();
        assert_eq!(v.autoscroll_target(0), Err(ViewError::LayoutMeasurement(0)));
        let v = measured();
        assert_eq!(v.autoscroll_target(7), Err(ViewError::LayoutMeasurement(7)));
    }

    #[test]
    fn test_fades() {
        let mut v = measured();
        assert!(!v.show_top_fade());
        assert!(v.show_bottom_fade());

        v.scroll_to(1).unwrap();
        assert!(v.show_top_fade());
        assert!(v.show_bottom_fade());

        v.scroll_to(2).unwrap();
        assert!(v.show_top_fade());
        assert!(!v.show_bottom_fade());

        v.scroll_by(-100);
        assert_eq!(v.offset(), 0);
        assert!(!v.show_top_fade());
    }

    #[test]
    fn test_tap() {
        let v = view();
        assert_eq!(v.tap(2), Some(2));
        assert_eq!(v.tap(3), None);
    }
}
