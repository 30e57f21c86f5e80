//! Audio playback seam.
//!
//! The host provides the actual decoder and output device. The core only
//! describes what to load and when to play it.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// How a clip should be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSpec {
    /// Asset path relative to the site root, e.g. `/click.mp3`.
    pub path: &'static str,
    pub looping: bool,
    /// Linear gain in `0.0..=1.0`.
    pub volume: f32,
    pub preload: bool,
}

/// State of the shared output context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    Running,
    /// Waiting for a user gesture before audio may start.
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    Load { path: String, reason: String },
    Playback { path: String, reason: String },
    Output(String),
}

impl Display for AudioError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load { path, reason } => write!(f, "failed to load {path}: {reason}"),
            Self::Playback { path, reason } => write!(f, "failed to play {path}: {reason}"),
            Self::Output(reason) => write!(f, "audio output unavailable: {reason}"),
        }
    }
}

impl Error for AudioError {}

/// One loaded clip.
pub trait AudioHandle {
    fn play(&mut self) -> Result<(), AudioError>;
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
    fn set_volume(&mut self, volume: f32);
    /// Releases decoder resources. The handle is not used afterwards.
    fn unload(&mut self);
}

/// Loads clips and controls the shared output.
pub trait AudioBackend {
    type Handle: AudioHandle;

    fn load(&mut self, spec: &AudioSpec) -> Result<Self::Handle, AudioError>;
    fn output_state(&self) -> OutputState;
    fn resume_output(&mut self) -> Result<(), AudioError>;
    fn set_global_mute(&mut self, muted: bool);
}
