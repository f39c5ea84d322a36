use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::logging::LogLevel;
use crate::transcript::Language;

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "dialogo.cfg";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_REWIND_THRESHOLD_MS: u64 = 1000;
pub const DEFAULT_VIEWPORT_ROWS: usize = 20;
pub const DEFAULT_WIDTH: usize = 72;

/// Player options that can be set via CLI or config file
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    // Commandline-only options
    pub config_dir: Option<String>,
    pub dump_timeline: bool,
    pub headless: bool,

    // Commandline and config file options
    pub transcript_path: Option<PathBuf>,
    pub audio_path: Option<PathBuf>,
    pub language: Language,
    pub sound_driver: SoundDriver,
    pub volume: Option<f32>,
    pub poll_interval_ms: u64,
    pub rewind_threshold_ms: u64,
    pub viewport_rows: usize,
    pub width: usize,
    pub log_file: Option<String>,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundDriver {
    #[default]
    Rodio,
    None,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config_dir: None,
            dump_timeline: false,
            headless: false,
            transcript_path: None,
            audio_path: None,
            language: Language::En,
            sound_driver: SoundDriver::Rodio,
            volume: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            rewind_threshold_ms: DEFAULT_REWIND_THRESHOLD_MS,
            viewport_rows: DEFAULT_VIEWPORT_ROWS,
            width: DEFAULT_WIDTH,
            log_file: None,
            log_level: LogLevel::Info,
        }
    }
}

/// Load configuration from `dialogo.cfg` in `config_dir` (or the working
/// directory). A missing file yields the defaults.
pub fn load_config(config_dir: &Option<String>) -> Result<Options> {
    let dir = config_dir
        .as_deref()
        .map(Path::new)
        .unwrap_or_else(|| Path::new("."));
    let path = dir.join(CONFIG_FILE);

    let mut opts = Options {
        config_dir: config_dir.clone(),
        ..Options::default()
    };
    if !path.is_file() {
        log::debug!("No config file at {}, using defaults", path.display());
        return Ok(opts);
    }

    let data = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut failure = None;
    parse_properties(&data, &mut |key, value| {
        if failure.is_some() {
            return;
        }
        if let Err(e) = apply_setting(&mut opts, key, value) {
            failure = Some(e.context(format!("In {}", path.display())));
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(opts),
    }
}

fn apply_setting(opts: &mut Options, key: &str, value: &str) -> Result<()> {
    match key.to_lowercase().as_str() {
        "transcript" => opts.transcript_path = Some(PathBuf::from(value)),
        "audio" => opts.audio_path = Some(PathBuf::from(value)),
        "language" => opts.language = parse_language(value)?,
        "sound" => opts.sound_driver = parse_sound_driver(value)?,
        "volume" => {
            let int_vol: i32 = value.parse().context("Invalid volume")?;
            opts.volume = Some(parse_volume(int_vol));
        }
        "poll" => opts.poll_interval_ms = parse_positive(value, "poll interval")?,
        "rewindthreshold" => {
            opts.rewind_threshold_ms = value.parse().context("Invalid rewind threshold")?
        }
        "rows" => opts.viewport_rows = parse_positive(value, "row count")? as usize,
        "width" => opts.width = parse_positive(value, "width")? as usize,
        "logfile" => opts.log_file = Some(value.to_string()),
        "loglevel" => opts.log_level = value.parse().map_err(anyhow::Error::msg)?,
        _ => log::warn!("Ignoring unknown config key: {}", key),
    }
    Ok(())
}

/// Parse `key = value` lines, invoking `handler` for each pair.
///
/// `#` starts a comment, also after a value. Lines without `=` are skipped.
pub fn parse_properties(data: &str, handler: &mut dyn FnMut(&str, &str)) {
    for line in data.lines() {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if key.is_empty() {
                    log::warn!("Value without key: {}", line);
                    continue;
                }
                handler(key, value.trim());
            }
            None => log::warn!("Key without value: {}", line),
        }
    }
}

pub fn parse_language(s: &str) -> Result<Language> {
    s.parse().map_err(anyhow::Error::msg)
}

pub fn parse_sound_driver(s: &str) -> Result<SoundDriver> {
    match s.to_lowercase().as_str() {
        "rodio" | "default" => Ok(SoundDriver::Rodio),
        "none" | "nosound" => Ok(SoundDriver::None),
        _ => anyhow::bail!("Invalid sound driver: {}. Valid options: rodio, none", s),
    }
}

/// Parse a volume value (0-100) to a float (0.0-1.0)
pub fn parse_volume(vol: i32) -> f32 {
    if vol < 0 {
        return 0.0;
    }
    if vol > 100 {
        return 1.0;
    }
    vol as f32 / 100.0
}

fn parse_positive(s: &str, what: &str) -> Result<u64> {
    let value: u64 = s.parse().with_context(|| format!("Invalid {}", what))?;
    if value == 0 {
        anyhow::bail!("The {} must be positive", what);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), contents).unwrap();
        dir
    }

    fn dir_option(dir: &tempfile::TempDir) -> Option<String> {
        Some(dir.path().to_string_lossy().into_owned())
    }

    #[test]
    fn test_parse_volume() {
        assert_eq!(parse_volume(0), 0.0);
        assert_eq!(parse_volume(50), 0.5);
        assert_eq!(parse_volume(100), 1.0);
        assert_eq!(parse_volume(-10), 0.0);
        assert_eq!(parse_volume(150), 1.0);
    }

    #[test]
    fn test_parse_sound_driver() {
        assert_eq!(parse_sound_driver("Rodio").unwrap(), SoundDriver::Rodio);
        assert_eq!(parse_sound_driver("none").unwrap(), SoundDriver::None);
        assert!(parse_sound_driver("openal").is_err());
    }

    #[test]
    fn test_parse_properties() {
        let mut pairs = Vec::new();
        parse_properties(
            "# comment\n a = 1 \nb=two # trailing\n\nbare\n= nokey\nc =\n",
            &mut |k, v| pairs.push((k.to_string(), v.to_string())),
        );
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two".to_string()),
                ("c".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_options_default() {
        let opts = Options::default();
        assert_eq!(opts.poll_interval_ms, 100);
        assert_eq!(opts.rewind_threshold_ms, 1000);
        assert_eq!(opts.language, Language::En);
        assert_eq!(opts.sound_driver, SoundDriver::Rodio);
        assert!(opts.transcript_path.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let opts = load_config(&dir_option(&dir)).unwrap();
        assert_eq!(opts.width, DEFAULT_WIDTH);
        assert_eq!(opts.config_dir, dir_option(&dir));
    }

    #[test]
    fn test_load_config_values() {
        let dir = write_config(
            "transcript = data/dialog.json\n\
             audio = data/dialog.ogg\n\
             language = es\n\
             sound = none\n\
             volume = 40\n\
             poll = 50\n\
             rows = 12\n\
             loglevel = debug\n\
             colour = blue\n",
        );
        let opts = load_config(&dir_option(&dir)).unwrap();
        assert_eq!(opts.transcript_path, Some(PathBuf::from("data/dialog.json")));
        assert_eq!(opts.audio_path, Some(PathBuf::from("data/dialog.ogg")));
        assert_eq!(opts.language, Language::Es);
        assert_eq!(opts.sound_driver, SoundDriver::None);
        assert_eq!(opts.volume, Some(0.4));
        assert_eq!(opts.poll_interval_ms, 50);
        assert_eq!(opts.viewport_rows, 12);
        assert_eq!(opts.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_load_config_bad_value() {
        let dir = write_config("poll = 0\n");
        assert!(load_config(&dir_option(&dir)).is_err());

        let dir = write_config("language = fr\n");
        assert!(load_config(&dir_option(&dir)).is_err());
    }
}
