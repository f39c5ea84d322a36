use crate::config::{parse_language, parse_sound_driver, parse_volume, Options};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Dialogo - bilingual transcript player
#[derive(Parser, Debug, Default)]
#[command(name = "dialogo")]
#[command(version)]
#[command(
    about = "Plays a recorded dialogue with its English/Spanish transcript kept in step",
    long_about = None
)]
pub struct Cli {
    /// Configuration directory path
    #[arg(short, long, value_name = "CONFIGDIR")]
    pub configdir: Option<String>,

    /// Transcript JSON file
    #[arg(short, long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Audio recording (wav or ogg)
    #[arg(short, long, value_name = "FILE")]
    pub audio: Option<PathBuf>,

    /// Initial primary language (en, es)
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Sound driver (rodio, none)
    #[arg(long, value_name = "DRIVER")]
    pub sound: Option<String>,

    /// Playback volume (0-100)
    #[arg(long, value_name = "VOLUME")]
    pub volume: Option<String>,

    /// Status poll interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub poll: Option<u64>,

    /// Log file path
    #[arg(short, long, value_name = "FILE")]
    pub logfile: Option<String>,

    /// Log level (nothing, error, warning, info, debug, all)
    #[arg(long, value_name = "LEVEL")]
    pub loglevel: Option<String>,

    /// Print the phrase timeline and exit
    #[arg(long = "dump-timeline")]
    pub dump_timeline: bool,

    /// Play to the end without prompting, printing each phrase
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref config_dir) = self.configdir {
            opts.config_dir = Some(config_dir.clone());
        }

        if let Some(ref transcript) = self.transcript {
            opts.transcript_path = Some(transcript.clone());
        }

        if let Some(ref audio) = self.audio {
            opts.audio_path = Some(audio.clone());
        }

        if let Some(ref lang) = self.lang {
            opts.language = parse_language(lang).context("Invalid --lang")?;
        }

        if let Some(ref sound) = self.sound {
            opts.sound_driver = parse_sound_driver(sound)?;
        }

        if let Some(ref vol) = self.volume {
            let int_vol: i32 = vol.parse().context("Invalid volume")?;
            opts.volume = Some(parse_volume(int_vol));
        }

        if let Some(poll) = self.poll {
            if poll == 0 {
                anyhow::bail!("The poll interval must be positive");
            }
            opts.poll_interval_ms = poll;
        }

        if let Some(ref log_file) = self.logfile {
            opts.log_file = Some(log_file.clone());
        }

        if let Some(ref level) = self.loglevel {
            opts.log_level = level.parse().map_err(anyhow::Error::msg)?;
        }

        if self.dump_timeline {
            opts.dump_timeline = true;
        }

        if self.headless {
            opts.headless = true;
        }

        Ok(opts)
    }
}
