//! Transcript dataset loading
//!
//! The dataset is a JSON document:
//! `{ "pause": ms, "speakers": [ { "name", "phrases": [ { "words": {"en","es"}, "time": ms } ] } ] }`
//!
//! Times are whole milliseconds; integral floats such as `1500.0` are
//! accepted, fractional or negative ones are not.

use std::fs;
use std::path::{Path, PathBuf};

use super::types::TranscriptData;

/// Error type for dataset loading
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// The file could not be read
    #[error("Failed to read transcript {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid transcript JSON
    #[error("Invalid transcript JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but breaks a dataset rule
    #[error("Invalid transcript: {0}")]
    Invalid(String),
}

/// Result type for dataset loading
pub type TranscriptResult<T> = Result<T, TranscriptError>;

/// Parse a dataset from a JSON string
pub fn parse_transcript(json: &str) -> TranscriptResult<TranscriptData> {
    let data: TranscriptData = serde_json::from_str(json)?;
    validate(&data)?;
    Ok(data)
}

/// Load a dataset from a JSON file
pub fn load_transcript(path: &Path) -> TranscriptResult<TranscriptData> {
    let json = fs::read_to_string(path).map_err(|source| TranscriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = parse_transcript(&json)?;
    log::debug!(
        "Loaded transcript {:?}: {} speakers, {} phrases, pause {}ms",
        path,
        data.speakers.len(),
        data.phrase_count(),
        data.pause
    );
    Ok(data)
}

fn validate(data: &TranscriptData) -> TranscriptResult<()> {
    let mut total = 0u64;
    let mut first = true;
    for (i, speaker) in data.speakers.iter().enumerate() {
        if speaker.name.trim().is_empty() {
            return Err(TranscriptError::Invalid(format!(
                "speaker {} has an empty name",
                i
            )));
        }
        for phrase in &speaker.phrases {
            let gap = if first { 0 } else { data.pause };
            first = false;
            total = total
                .checked_add(gap)
                .and_then(|t| t.checked_add(phrase.time))
                .ok_or_else(|| {
                    TranscriptError::Invalid(format!(
                        "transcript length overflows at speaker {}",
                        i
                    ))
                })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "pause": 250,
        "speakers": [
            {
                "name": "John",
                "phrases": [
                    { "words": { "en": "Hello, Maria!", "es": "¡Hola, María!" }, "time": 1500 }
                ]
            },
            {
                "name": "Maria",
                "phrases": [
                    { "words": { "en": "Hi John.", "es": "Hola John." }, "time": 1000 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let data = parse_transcript(SAMPLE).unwrap();
        assert_eq!(data.pause, 250);
        assert_eq!(data.speakers.len(), 2);
        assert_eq!(data.speakers[0].phrases[0].words.es, "¡Hola, María!");
        assert_eq!(data.speakers[1].phrases[0].time, 1000);
    }

    #[test]
    fn test_parse_missing_words_is_error() {
        let json = r#"{ "pause": 0, "speakers": [ { "name": "A", "phrases": [ { "time": 5 } ] } ] }"#;
        assert!(matches!(
            parse_transcript(json),
            Err(TranscriptError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_negative_pause_is_error() {
        let json = r#"{ "pause": -5, "speakers": [] }"#;
        assert!(parse_transcript(json).is_err());
    }

    #[test]
    fn test_parse_empty_name_is_invalid() {
        let json = r#"{ "pause": 0, "speakers": [ { "name": " ", "phrases": [] } ] }"#;
        assert!(matches!(
            parse_transcript(json),
            Err(TranscriptError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_overflowing_total_is_invalid() {
        let json = format!(
            r#"{{ "pause": 10, "speakers": [ {{ "name": "A", "phrases": [
                {{ "words": {{ "en": "a", "es": "a" }}, "time": {} }},
                {{ "words": {{ "en": "b", "es": "b" }}, "time": 1 }}
            ] }} ] }}"#,
            u64::MAX
        );
        assert!(matches!(
            parse_transcript(&json),
            Err(TranscriptError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_integral_float_times() {
        let json = r#"{ "pause": 500.0, "speakers": [ { "name": "A", "phrases": [
            { "words": { "en": "a", "es": "a" }, "time": 1500.0 }
        ] } ] }"#;
        let data = parse_transcript(json).unwrap();
        assert_eq!(data.pause, 500);
        assert_eq!(data.speakers[0].phrases[0].time, 1500);
    }

    #[test]
    fn test_parse_fractional_time_is_error() {
        for time in ["1500.5", "-1", "-1.0"] {
            let json = format!(
                r#"{{ "speakers": [ {{ "name": "A", "phrases": [
                    {{ "words": {{ "en": "a", "es": "a" }}, "time": {} }}
                ] }} ] }}"#,
                time
            );
            assert!(matches!(
                parse_transcript(&json),
                Err(TranscriptError::Parse(_))
            ));
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let data = load_transcript(file.path()).unwrap();
        assert_eq!(data.phrase_count(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_transcript(Path::new("/nonexistent/transcript.json")).unwrap_err();
        assert!(matches!(err, TranscriptError::Io { .. }));
    }
}
