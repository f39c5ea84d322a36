//! Primary language selection
//!
//! One selection is shared by the header and the transcript list. It is
//! passed to each view explicitly; `select` is the only way to change it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::transcript::Language;

/// Shared primary-language selection
#[derive(Debug, Clone, Default)]
pub struct LanguageSelection {
    inner: Arc<RwLock<Language>>,
}

impl LanguageSelection {
    /// Create a selection starting at `language`
    pub fn new(language: Language) -> Self {
        Self {
            inner: Arc::new(RwLock::new(language)),
        }
    }

    /// The primary language
    pub fn get(&self) -> Language {
        *self.inner.read()
    }

    /// The secondary language shown under the primary one
    pub fn secondary(&self) -> Language {
        self.get().other()
    }

    /// Change the primary language. Returns true if it changed.
    pub fn select(&self, language: Language) -> bool {
        let mut current = self.inner.write();
        if *current == language {
            return false;
        }
        log::debug!("Language changed: {} -> {}", *current, language);
        *current = language;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        let selection = LanguageSelection::default();
        assert_eq!(selection.get(), Language::En);
        assert_eq!(selection.secondary(), Language::Es);
    }

    #[test]
    fn test_select_is_visible_to_clones() {
        let header = LanguageSelection::new(Language::En);
        let transcript = header.clone();

        assert!(header.select(Language::Es));
        assert_eq!(transcript.get(), Language::Es);
        assert_eq!(transcript.secondary(), Language::En);
    }

    #[test]
    fn test_select_same_language() {
        let selection = LanguageSelection::new(Language::Es);
        assert!(!selection.select(Language::Es));
    }
}
