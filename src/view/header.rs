//! Language switch header

use crate::language::LanguageSelection;
use crate::transcript::Language;

/// One selectable language target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagTarget {
    pub language: Language,
    pub selected: bool,
}

/// Header with one target per language
#[derive(Debug, Clone)]
pub struct HeaderView {
    selection: LanguageSelection,
}

impl HeaderView {
    pub fn new(selection: LanguageSelection) -> Self {
        Self { selection }
    }

    /// Targets in display order, the current language marked selected
    pub fn flags(&self) -> [FlagTarget; 2] {
        let current = self.selection.get();
        Language::ALL.map(|language| FlagTarget {
            language,
            selected: language == current,
        })
    }

    /// Handle a press on a language target
    pub fn press(&self, language: Language) -> bool {
        self.selection.select(language)
    }

    /// Render as a single centered line, e.g. `[EN]  es`
    pub fn render(&self, width: usize) -> String {
        let line = self
            .flags()
            .iter()
            .map(|flag| {
                if flag.selected {
                    format!("[{}]", flag.language.code().to_uppercase())
                } else {
                    format!(" {} ", flag.language.code())
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        format!("{:^width$}", line, width = width)
            .trim_end()
            .to_string()
    }
}
