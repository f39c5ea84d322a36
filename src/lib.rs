// Dialogo library
// Bilingual transcript player: timeline, playback and terminal views

pub mod cli;
pub mod config;
pub mod language;
pub mod logging;
pub mod player;
pub mod screen;
pub mod transcript;
pub mod view;

pub use cli::Cli;
pub use config::Options;
pub use language::LanguageSelection;
pub use logging::LogLevel;
pub use screen::{PlayerScreen, UserAction};
pub use transcript::{Language, Timeline};
