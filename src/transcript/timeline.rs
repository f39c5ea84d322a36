//! Phrase timeline
//!
//! Interleaves each speaker's phrases by position and assigns every phrase
//! an absolute window into the recording.

use serde::Serialize;

use super::types::{Language, TranscriptData, Words};

/// A phrase placed on the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phrase {
    /// Speaker name
    pub speaker: String,
    /// Bilingual text
    pub words: Words,
    /// Start time in milliseconds
    pub start_time: u64,
    /// End time in milliseconds (`start_time` + authored duration)
    pub end_time: u64,
}

impl Phrase {
    /// Authored duration in milliseconds
    pub fn duration(&self) -> u64 {
        self.end_time - self.start_time
    }

    /// Check if the window contains `position_ms`, both bounds inclusive
    pub fn contains(&self, position_ms: u64) -> bool {
        self.start_time <= position_ms && position_ms <= self.end_time
    }

    /// Text in the given language
    pub fn text(&self, language: Language) -> &str {
        self.words.get(language)
    }
}

/// The derived, ordered sequence of phrases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    phrases: Vec<Phrase>,
    pause: u64,
}

impl Timeline {
    /// Build the timeline from a dataset.
    ///
    /// Phrases are taken round-robin by position: at position `i` every
    /// speaker that has an `i`th phrase contributes it, in speaker order.
    /// Each phrase starts `pause` ms after the previous one ends. Times
    /// saturate at `u64::MAX`; the loader rejects datasets that would.
    pub fn build(data: &TranscriptData) -> Self {
        let max_len = data
            .speakers
            .iter()
            .map(|s| s.phrases.len())
            .max()
            .unwrap_or(0);

        let mut phrases = Vec::with_capacity(data.phrase_count());
        let mut cumulative = 0u64;

        for i in 0..max_len {
            for speaker in &data.speakers {
                if let Some(raw) = speaker.phrases.get(i) {
                    phrases.push(Phrase {
                        speaker: speaker.name.clone(),
                        words: raw.words.clone(),
                        start_time: cumulative,
                        end_time: cumulative.saturating_add(raw.time),
                    });
                    cumulative = cumulative
                        .saturating_add(raw.time)
                        .saturating_add(data.pause);
                }
            }
        }

        Self {
            phrases,
            pause: data.pause,
        }
    }

    /// Index of the phrase whose window contains `position_ms`.
    ///
    /// First match wins, so on a shared boundary (only possible with a
    /// zero pause) the earlier phrase is returned. Positions in a pause gap
    /// or past the last phrase resolve to `None`.
    pub fn resolve(&self, position_ms: u64) -> Option<usize> {
        self.phrases.iter().position(|p| p.contains(position_ms))
    }

    /// Get a phrase by index
    pub fn get(&self, index: usize) -> Option<&Phrase> {
        self.phrases.get(index)
    }

    /// All phrases in order
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    /// Number of phrases
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Check if the timeline is empty
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Pause between phrases in milliseconds
    pub fn pause(&self) -> u64 {
        self.pause
    }

    /// End of the last phrase; informational only, the media reports its own duration
    pub fn length(&self) -> u64 {
        self.phrases.last().map_or(0, |p| p.end_time)
    }

    /// Index before `index`, staying at 0 for the first phrase
    pub fn previous_index(&self, index: usize) -> usize {
        index.saturating_sub(1)
    }

    /// Index after `index`, wrapping to 0 after the last phrase
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 < self.phrases.len() {
            index + 1
        } else {
            0
        }
    }
}
