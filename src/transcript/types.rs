//! Core types for the transcript dataset
//!
//! The dataset is authored by hand: every phrase carries its own duration,
//! which is not measured from the audio.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// One of the two transcript languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Spanish
    Es,
}

impl Language {
    /// Both languages in display order
    pub const ALL: [Language; 2] = [Language::En, Language::Es];

    /// The language shown as the secondary line when `self` is primary
    pub fn other(self) -> Self {
        match self {
            Language::En => Language::Es,
            Language::Es => Language::En,
        }
    }

    /// Short lowercase code ("en", "es")
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "es" | "spanish" | "espanol" => Ok(Language::Es),
            _ => Err(format!("Invalid language: {}. Valid options: en, es", s)),
        }
    }
}

/// The bilingual text of a phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Words {
    pub en: String,
    pub es: String,
}

impl Words {
    pub fn new(en: &str, es: &str) -> Self {
        Self {
            en: en.to_string(),
            es: es.to_string(),
        }
    }

    /// Text in the given language
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Es => &self.es,
        }
    }
}

/// Accept a millisecond count written as an integer or an integral float
fn deserialize_millis<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Whole(u64),
        Float(f64),
    }

    match Millis::deserialize(deserializer)? {
        Millis::Whole(ms) => Ok(ms),
        Millis::Float(ms) if ms >= 0.0 && ms.fract() == 0.0 && ms <= u64::MAX as f64 => {
            Ok(ms as u64)
        }
        Millis::Float(ms) => Err(serde::de::Error::custom(format!(
            "expected whole non-negative milliseconds, got {}",
            ms
        ))),
    }
}

/// A phrase as authored in the dataset, before timing is derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPhrase {
    pub words: Words,
    /// Duration in milliseconds
    #[serde(deserialize_with = "deserialize_millis")]
    pub time: u64,
}

impl RawPhrase {
    pub fn new(en: &str, es: &str, time: u64) -> Self {
        Self {
            words: Words::new(en, es),
            time,
        }
    }
}

/// A speaker and their phrases in speaking order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    #[serde(default)]
    pub phrases: Vec<RawPhrase>,
}

impl Speaker {
    pub fn new(name: &str, phrases: Vec<RawPhrase>) -> Self {
        Self {
            name: name.to_string(),
            phrases,
        }
    }
}

/// The whole transcript dataset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranscriptData {
    /// Silence between consecutive phrases, in milliseconds
    #[serde(default, deserialize_with = "deserialize_millis")]
    pub pause: u64,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
}

impl TranscriptData {
    pub fn new(pause: u64, speakers: Vec<Speaker>) -> Self {
        Self { pause, speakers }
    }

    /// Total number of authored phrases across all speakers
    pub fn phrase_count(&self) -> usize {
        self.speakers.iter().map(|s| s.phrases.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_other() {
        assert_eq!(Language::En.other(), Language::Es);
        assert_eq!(Language::Es.other(), Language::En);
    }

    #[test]
    fn test_language_default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ES".parse::<Language>().unwrap(), Language::Es);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_words_get() {
        let words = Words::new("Hello", "Hola");
        assert_eq!(words.get(Language::En), "Hello");
        assert_eq!(words.get(Language::Es), "Hola");
    }

    #[test]
    fn test_phrase_count() {
        let data = TranscriptData::new(
            250,
            vec![
                Speaker::new("A", vec![RawPhrase::new("a", "a", 10)]),
                Speaker::new(
                    "B",
                    vec![RawPhrase::new("b", "b", 10), RawPhrase::new("c", "c", 10)],
                ),
            ],
        );
        assert_eq!(data.phrase_count(), 3);
    }
}
