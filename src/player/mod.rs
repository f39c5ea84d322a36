//! Audio playback
//!
//! This module drives the recording and keeps the transcript in step with it.
//!
//! # Architecture
//!
//! - `MediaEngine` trait is the seam to whatever decodes and outputs audio
//! - `RodioEngine` plays through the default output device on its own thread
//! - `NullEngine` plays silence for a fixed duration
//! - `PlaybackController` owns the engine for one session and publishes
//!   `PlaybackState`
//! - `Transport` implements play/pause, rewind, forward and phrase taps
//!
//! # Thread Safety
//!
//! The controller and transport are used from a single thread. Only the
//! rodio engine runs a thread of its own, reached through a command channel.

pub mod controller;
pub mod engine;
pub mod null;
pub mod rodio_engine;
pub mod state;
pub mod transport;
pub mod types;

pub use controller::{Liveness, PlaybackController};
pub use engine::{AudioSource, EngineError, EngineResult, EngineStatus, MediaEngine};
pub use null::NullEngine;
pub use rodio_engine::RodioEngine;
pub use state::PlaybackState;
pub use transport::Transport;
pub use types::{PlayerError, PlayerResult, SeekTarget, TransportState, REWIND_THRESHOLD_MS};
