//! Rodio-based media engine
//!
//! The audio runs on a dedicated thread since rodio's OutputStream is not Send.
//! `RodioEngine` is a thin client that sends commands to that thread and
//! waits for each reply.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::engine::{AudioSource, EngineError, EngineResult, EngineStatus, MediaEngine};

type Reply<T> = Sender<EngineResult<T>>;

/// Commands sent to the audio thread
enum AudioCommand {
    /// Decode and queue a source, paused at 0
    Load(AudioSource, Reply<()>),
    Play(Reply<()>),
    Pause(Reply<()>),
    /// Seek to a position in milliseconds
    Seek(u64, Reply<()>),
    Status(Reply<EngineStatus>),
    Unload(Reply<()>),
    /// Set output volume (0.0 - 1.0)
    SetVolume(f32),
    /// Shutdown the audio thread
    Shutdown,
}

/// A decoded source queued on a sink
struct LoadedTrack {
    /// Encoded file bytes, kept to rebuild the decoder after the sink drains
    bytes: Arc<[u8]>,
    sink: Sink,
    duration_ms: u64,
    /// Whether playback was requested and the end has not been reached yet
    playing: bool,
}

impl LoadedTrack {
    fn decoder(bytes: &Arc<[u8]>) -> EngineResult<Decoder<Cursor<Arc<[u8]>>>> {
        Decoder::new(Cursor::new(Arc::clone(bytes))).map_err(|e| EngineError::Decode(e.to_string()))
    }

    /// Queue a fresh decoder once the previous one has played out
    fn refill(&self) -> EngineResult<()> {
        if self.sink.empty() {
            if !self.playing {
                self.sink.pause();
            }
            self.sink.append(Self::decoder(&self.bytes)?);
        }
        Ok(())
    }

    fn position_ms(&self) -> u64 {
        if self.sink.empty() {
            return self.duration_ms;
        }
        let pos = self.sink.get_pos().as_millis() as u64;
        if self.duration_ms > 0 {
            pos.min(self.duration_ms)
        } else {
            pos
        }
    }
}

/// Audio thread state
struct AudioThread {
    stream_handle: OutputStreamHandle,
    track: Option<LoadedTrack>,
    volume: f32,
}

impl AudioThread {
    fn load(&mut self, source: &AudioSource) -> EngineResult<()> {
        let bytes: Arc<[u8]> = match source {
            AudioSource::File(path) => read_file(path)?.into(),
            AudioSource::Silence(_) => {
                return Err(EngineError::Decode(
                    "silence sources are played by the null engine".into(),
                ))
            }
        };

        let decoder = LoadedTrack::decoder(&bytes)?;
        let duration_ms = decoder
            .total_duration()
            .map_or(0, |d| d.as_millis() as u64);

        let sink = Sink::try_new(&self.stream_handle).map_err(|e| EngineError::Output(e.to_string()))?;
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(decoder);

        if let Some(old) = self.track.take() {
            old.sink.stop();
        }
        self.track = Some(LoadedTrack {
            bytes,
            sink,
            duration_ms,
            playing: false,
        });

        log::debug!("RodioEngine: loaded {:?} ({}ms)", source, duration_ms);
        Ok(())
    }

    fn track(&mut self) -> EngineResult<&mut LoadedTrack> {
        self.track.as_mut().ok_or(EngineError::NotLoaded)
    }

    fn play(&mut self) -> EngineResult<()> {
        let track = self.track()?;
        track.refill()?;
        track.sink.play();
        track.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> EngineResult<()> {
        let track = self.track()?;
        track.sink.pause();
        track.playing = false;
        Ok(())
    }

    fn seek(&mut self, position_ms: u64) -> EngineResult<()> {
        let track = self.track()?;
        let target = if track.duration_ms > 0 {
            position_ms.min(track.duration_ms)
        } else {
            position_ms
        };
        track.refill()?;
        track
            .sink
            .try_seek(Duration::from_millis(target))
            .map_err(|e| EngineError::Seek(e.to_string()))
    }

    fn status(&mut self) -> EngineResult<EngineStatus> {
        let track = self.track()?;
        let mut did_just_finish = false;
        if track.playing && track.sink.empty() {
            track.playing = false;
            did_just_finish = true;
        }
        Ok(EngineStatus {
            position_ms: track.position_ms(),
            duration_ms: track.duration_ms,
            is_playing: track.playing && !track.sink.is_paused(),
            did_just_finish,
        })
    }

    fn unload(&mut self) -> EngineResult<()> {
        let track = self.track.take().ok_or(EngineError::NotLoaded)?;
        track.sink.stop();
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(track) = &self.track {
            track.sink.set_volume(self.volume);
        }
    }
}

fn read_file(path: &Path) -> EngineResult<Vec<u8>> {
    fs::read(path).map_err(|e| EngineError::Io(format!("{}: {}", path.display(), e)))
}

/// Audio thread main function
fn audio_thread_main(rx: Receiver<AudioCommand>, ready: Sender<EngineResult<()>>) {
    log::debug!("RodioEngine: audio thread starting");

    // Initialize audio output on this thread
    let (_stream, stream_handle) = match OutputStream::try_default() {
        Ok(s) => s,
        Err(e) => {
            let _ = ready.send(Err(EngineError::Output(e.to_string())));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    let mut audio = AudioThread {
        stream_handle,
        track: None,
        volume: 1.0,
    };

    loop {
        match rx.recv() {
            Ok(cmd) => match cmd {
                AudioCommand::Load(source, reply) => {
                    let _ = reply.send(audio.load(&source));
                }
                AudioCommand::Play(reply) => {
                    let _ = reply.send(audio.play());
                }
                AudioCommand::Pause(reply) => {
                    let _ = reply.send(audio.pause());
                }
                AudioCommand::Seek(position_ms, reply) => {
                    let _ = reply.send(audio.seek(position_ms));
                }
                AudioCommand::Status(reply) => {
                    let _ = reply.send(audio.status());
                }
                AudioCommand::Unload(reply) => {
                    let _ = reply.send(audio.unload());
                }
                AudioCommand::SetVolume(volume) => audio.set_volume(volume),
                AudioCommand::Shutdown => {
                    log::debug!("RodioEngine: shutting down");
                    if let Some(track) = audio.track.take() {
                        track.sink.stop();
                    }
                    break;
                }
            },
            Err(_) => {
                // Channel closed
                log::debug!("RodioEngine: channel closed");
                break;
            }
        }
    }

    log::debug!("RodioEngine: audio thread exited");
}

/// Media engine backed by rodio on the default output device
pub struct RodioEngine {
    sender: Sender<AudioCommand>,
    thread: Option<JoinHandle<()>>,
}

impl RodioEngine {
    /// Start the audio thread and open the default output device
    pub fn new() -> EngineResult<Self> {
        let (tx, rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name("dialogo-audio".into())
            .spawn(move || audio_thread_main(rx, ready_tx))
            .map_err(|e| EngineError::Output(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                sender: tx,
                thread: Some(thread),
            }),
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(EngineError::Disconnected)
            }
        }
    }

    /// Set output volume (0.0 - 1.0)
    pub fn set_volume(&self, volume: f32) {
        let _ = self.sender.send(AudioCommand::SetVolume(volume));
    }

    fn request<T>(&self, make: impl FnOnce(Reply<T>) -> AudioCommand) -> EngineResult<T> {
        let (tx, rx) = mpsc::channel();
        self.sender
            .send(make(tx))
            .map_err(|_| EngineError::Disconnected)?;
        rx.recv().map_err(|_| EngineError::Disconnected)?
    }
}

impl MediaEngine for RodioEngine {
    fn name(&self) -> &'static str {
        "rodio"
    }

    fn load(&mut self, source: &AudioSource) -> EngineResult<()> {
        let source = source.clone();
        self.request(|reply| AudioCommand::Load(source, reply))
    }

    fn play(&mut self) -> EngineResult<()> {
        self.request(AudioCommand::Play)
    }

    fn pause(&mut self) -> EngineResult<()> {
        self.request(AudioCommand::Pause)
    }

    fn seek(&mut self, position_ms: u64) -> EngineResult<()> {
        self.request(|reply| AudioCommand::Seek(position_ms, reply))
    }

    fn status(&mut self) -> EngineResult<EngineStatus> {
        self.request(AudioCommand::Status)
    }

    fn unload(&mut self) -> EngineResult<()> {
        self.request(AudioCommand::Unload)
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        let _ = self.sender.send(AudioCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}
