//! Plain-text frame renderer
//!
//! Lays the transcript rows out into wrapped lines, records each row's
//! position in the `TranscriptView`, and composes the full frame.

use super::controls::ControlsView;
use super::header::HeaderView;
use super::transcript::{PhraseRow, RowLayout, TranscriptView};

const MIN_WIDTH: usize = 24;
const INDENT: &str = "    ";
const TOP_FADE: &str = "  ^ ^ ^";
const BOTTOM_FADE: &str = "  v v v";

/// Renders frames of a fixed size
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    width: usize,
    viewport_rows: usize,
}

impl TextRenderer {
    pub fn new(width: usize, viewport_rows: usize) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            viewport_rows: viewport_rows.max(1),
        }
    }

    /// Lay out every row, record row layouts and geometry in `view`, and
    /// return the content lines.
    pub fn layout(&self, view: &mut TranscriptView, current: usize) -> Vec<String> {
        let mut lines = Vec::new();
        let mut layouts = Vec::new();

        for row in view.rows(current) {
            let y = lines.len();
            self.layout_row(&row, &mut lines);
            layouts.push((row.index, RowLayout { y, height: lines.len() - y }));
        }

        for (index, layout) in layouts {
            view.set_row_layout(index, layout);
        }
        view.set_geometry(lines.len(), self.viewport_rows);
        lines
    }

    fn layout_row(&self, row: &PhraseRow<'_>, lines: &mut Vec<String>) {
        let marker = if row.is_current { "> " } else { "  " };
        let text_width = self.width.saturating_sub(INDENT.len() + marker.len() + 4);

        lines.push(format!("{}{:>2}. {}", marker, row.index + 1, row.speaker));
        push_labeled(lines, marker, row.primary.code(), row.primary_text, text_width);
        lines.push(format!(
            "{}{}{}",
            marker,
            INDENT,
            "-".repeat(self.width.saturating_sub(INDENT.len() + marker.len()))
        ));
        push_labeled(lines, marker, row.secondary.code(), row.secondary_text, text_width);
        lines.push(String::new());
    }

    /// Compose a frame from already laid out content lines
    pub fn compose(
        &self,
        header: &HeaderView,
        view: &TranscriptView,
        content: &[String],
        controls: &ControlsView,
        notice: Option<&str>,
    ) -> String {
        let mut frame = Vec::with_capacity(self.viewport_rows + 8);
        frame.push(header.render(self.width));
        frame.push(String::new());
        frame.push(if view.show_top_fade() { TOP_FADE } else { "" }.to_string());

        let visible = content.iter().skip(view.offset()).take(self.viewport_rows);
        let mut shown = 0;
        for line in visible {
            frame.push(line.trim_end().to_string());
            shown += 1;
        }
        frame.extend(std::iter::repeat(String::new()).take(self.viewport_rows - shown));

        frame.push(if view.show_bottom_fade() { BOTTOM_FADE } else { "" }.to_string());
        frame.extend(controls.render(self.width));
        if let Some(notice) = notice {
            frame.push(format!("! {}", notice));
        }

        let mut out = frame.join("\n");
        out.push('\n');
        out
    }
}

fn push_labeled(lines: &mut Vec<String>, marker: &str, code: &str, text: &str, width: usize) {
    for (i, chunk) in wrap(text, width).into_iter().enumerate() {
        let label = if i == 0 {
            format!("{}: ", code)
        } else {
            "    ".to_string()
        };
        lines.push(format!("{}{}{}{}", marker, INDENT, label, chunk));
    }
}

/// Greedy word wrap by character count. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let extra = if current_len == 0 { 0 } else { 1 };
        if current_len + extra + word.len() > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        } else if extra == 1 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
