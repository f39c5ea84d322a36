//! Log sink for the `log` facade
//!
//! Records go to stderr or to an append-mode log file. The interactive
//! player uses a file so log lines do not tear through the rendered frame.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Default log file for interactive sessions
pub const DEFAULT_LOG_FILE: &str = "dialogo.log";

/// Verbosity levels accepted on the command line and in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Nothing,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
    All,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Nothing => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::All => LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nothing" | "off" | "none" => Ok(LogLevel::Nothing),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "all" | "trace" => Ok(LogLevel::All),
            _ => Err(format!(
                "Invalid log level: {}. Valid options: nothing, error, warning, info, debug, all",
                s
            )),
        }
    }
}

enum Sink {
    Stderr,
    File(File),
}

struct Logger {
    level: LevelFilter,
    started: Instant,
    sink: Mutex<Sink>,
}

impl Logger {
    fn format(&self, record: &Record) -> String {
        let elapsed = self.started.elapsed();
        format!(
            "[{:>4}.{:03}] {:<5} {}: {}",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format(record);
        let mut sink = self.sink.lock();
        // A failed log write has nowhere better to go
        let _ = match &mut *sink {
            Sink::Stderr => writeln!(io::stderr(), "{}", line),
            Sink::File(file) => writeln!(file, "{}", line),
        };
    }

    fn flush(&self) {
        let mut sink = self.sink.lock();
        let _ = match &mut *sink {
            Sink::Stderr => io::stderr().flush(),
            Sink::File(file) => file.flush(),
        };
    }
}

/// Install the logger. Returns false if a logger was already installed.
///
/// With `file` set, records are appended to it; otherwise they go to stderr.
pub fn init_logging(level: LogLevel, file: Option<&Path>) -> io::Result<bool> {
    let sink = match file {
        Some(path) => Sink::File(OpenOptions::new().create(true).append(true).open(path)?),
        None => Sink::Stderr,
    };

    let logger = Box::new(Logger {
        level: level.to_level_filter(),
        started: Instant::now(),
        sink: Mutex::new(sink),
    });

    // set_logger takes a &'static; the logger lives for the rest of the process
    if log::set_logger(Box::leak(logger)).is_err() {
        return Ok(false);
    }
    log::set_max_level(level.to_level_filter());
    Ok(true)
}
