use anyhow::{Context, Result};
use clap::Parser;
use crossbeam::channel::{self, Receiver};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use dialogo::config::{self, SoundDriver};
use dialogo::logging::{init_logging, DEFAULT_LOG_FILE};
use dialogo::player::{AudioSource, MediaEngine, NullEngine, RodioEngine, Transport};
use dialogo::transcript::{load_transcript, Timeline};
use dialogo::view::{format_time, TextRenderer};
use dialogo::{Cli, Options, PlayerScreen, UserAction};

type Engine = Box<dyn MediaEngine>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = config::load_config(&cli.configdir)?;
    let options = cli.merge_into_options(options)?;

    let interactive = !options.headless && !options.dump_timeline;
    let log_file = options
        .log_file
        .clone()
        .or_else(|| interactive.then(|| DEFAULT_LOG_FILE.to_string()));
    init_logging(options.log_level, log_file.as_deref().map(Path::new))
        .context("Failed to open log file")?;

    let transcript_path = options
        .transcript_path
        .as_ref()
        .context("No transcript given: pass --transcript or set transcript in dialogo.cfg")?;
    let data = load_transcript(transcript_path)
        .with_context(|| format!("Failed to load {}", transcript_path.display()))?;
    let timeline = Arc::new(Timeline::build(&data));
    log::info!(
        "Loaded {} phrases, {} long, {}ms between phrases",
        timeline.len(),
        format_time(timeline.length()),
        timeline.pause()
    );

    if options.dump_timeline {
        return dump_timeline(&timeline);
    }

    let source = match &options.audio_path {
        Some(path) => AudioSource::file(path),
        None => {
            log::warn!("No audio given, playing silence for the transcript length");
            AudioSource::Silence(timeline.length())
        }
    };

    let transport = Transport::with_rewind_threshold(options.rewind_threshold_ms);
    log::debug!("Rewind restarts a phrase after {}ms", transport.rewind_threshold_ms());
    let mut screen: PlayerScreen<Engine> = PlayerScreen::new(
        timeline.clone(),
        options.language,
        transport,
        TextRenderer::new(options.width, options.viewport_rows),
    );
    if let Err(e) = screen.mount(open_engine(&options, &timeline, &source), &source) {
        log::error!("Player not usable: {}", e);
        if options.headless {
            anyhow::bail!("Failed to load audio: {}", e);
        }
    }

    let poll = Duration::from_millis(options.poll_interval_ms);
    if options.headless {
        run_headless(&mut screen, poll)?;
    } else {
        run_interactive(&mut screen, poll)?;
    }

    screen.unmount().context("Failed to release audio")?;
    log::logger().flush();
    Ok(())
}

/// Pick the configured engine, falling back to silence when no output
/// device can be opened.
fn open_engine(options: &Options, timeline: &Timeline, source: &AudioSource) -> Engine {
    let silent = || Box::new(NullEngine::new().with_file_duration(timeline.length())) as Engine;

    match options.sound_driver {
        _ if matches!(source, AudioSource::Silence(_)) => silent(),
        SoundDriver::None => silent(),
        SoundDriver::Rodio => match RodioEngine::new() {
            Ok(engine) => {
                if let Some(volume) = options.volume {
                    engine.set_volume(volume);
                }
                Box::new(engine)
            }
            Err(e) => {
                log::warn!("Audio output unavailable, continuing without sound: {}", e);
                silent()
            }
        },
    }
}

fn dump_timeline(timeline: &Timeline) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, timeline).context("Failed to write timeline")?;
    writeln!(out)?;
    Ok(())
}

fn run_headless(screen: &mut PlayerScreen<Engine>, poll: Duration) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    screen.handle(UserAction::TogglePlay);
    if let Some(notice) = screen.notice() {
        anyhow::bail!("Failed to start playback: {}", notice);
    }

    let timeline = screen.timeline().clone();
    let mut printed = None;
    loop {
        screen.tick();
        let state = *screen.state();
        if printed != Some(state.current_phrase_index) {
            if let Some(phrase) = timeline.get(state.current_phrase_index) {
                writeln!(
                    out,
                    "[{} +{}.{}s] {}: {} / {}",
                    format_time(phrase.start_time),
                    phrase.duration() / 1000,
                    phrase.duration() % 1000 / 100,
                    phrase.speaker,
                    phrase.text(screen.language()),
                    phrase.text(screen.language().other())
                )?;
            }
            printed = Some(state.current_phrase_index);
        }
        if !state.is_playing || !screen.is_ready() {
            break;
        }
        thread::sleep(poll);
    }
    Ok(())
}

fn spawn_input_thread() -> Result<Receiver<String>> {
    let (tx, rx) = channel::unbounded();
    thread::Builder::new()
        .name("dialogo-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("Failed to spawn input thread")?;
    Ok(rx)
}

fn run_interactive(screen: &mut PlayerScreen<Engine>, poll: Duration) -> Result<()> {
    let input = spawn_input_thread()?;
    let ticker = channel::tick(poll);

    draw(screen)?;
    loop {
        channel::select! {
            recv(input) -> line => {
                let Ok(line) = line else {
                    log::info!("Input closed");
                    screen.handle(UserAction::Quit);
                    break;
                };
                if !screen.handle_input(&line) {
                    break;
                }
                draw(screen)?;
            }
            recv(ticker) -> _ => {
                let changed = screen.tick();
                if changed || screen.state().is_playing {
                    draw(screen)?;
                }
            }
        }
    }
    Ok(())
}

fn draw(screen: &mut PlayerScreen<Engine>) -> Result<()> {
    let frame = screen.frame();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    // Clear and home the cursor
    write!(out, "\x1b[2J\x1b[H{}", frame)?;
    write!(out, "p play/pause  r rewind  f forward  N phrase  en/es  u/d scroll  q quit\n> ")?;
    out.flush()?;
    Ok(())
}
