//! Background music, UI effects and the persisted mute flag.
//!
//! # Responsibility
//! - Own every audio handle for the lifetime of the app context.
//! - Persist the mute flag and push it to live handles and the backend.
//!
//! # Invariants
//! - At most one background track exists; it is created on first start.
//! - An effect that is already playing is not started again.
//! - Audio failures are logged and never returned.

mod backend;

pub use backend::{AudioBackend, AudioError, AudioHandle, AudioSpec, OutputState};

use crate::kv::{read_or_none, write_logged, KeyValueStore};
use std::collections::BTreeMap;

pub const MUTE_KEY: &str = "sound_muted";
pub const BACKGROUND_MUSIC_ASSET: &str = "/bg-music.mp3";
pub const CLICK_ASSET: &str = "/click.mp3";
pub const DEFAULT_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SoundKind {
    UiClick,
    UiHover,
    Transition,
    Entrance,
    Heartbeat,
    Chime,
    Success,
    Error,
}

impl SoundKind {
    pub const ALL: [SoundKind; 8] = [
        SoundKind::UiClick,
        SoundKind::UiHover,
        SoundKind::Transition,
        SoundKind::Entrance,
        SoundKind::Heartbeat,
        SoundKind::Chime,
        SoundKind::Success,
        SoundKind::Error,
    ];

    /// Clip for this effect, if one ships.
    pub fn asset(self) -> Option<&'static str> {
        match self {
            SoundKind::UiClick => Some(CLICK_ASSET),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SoundKind::UiClick => "ui_click",
            SoundKind::UiHover => "ui_hover",
            SoundKind::Transition => "transition",
            SoundKind::Entrance => "entrance",
            SoundKind::Heartbeat => "heartbeat",
            SoundKind::Chime => "chime",
            SoundKind::Success => "success",
            SoundKind::Error => "error",
        }
    }

    fn spec(self) -> Option<AudioSpec> {
        self.asset().map(|path| AudioSpec {
            path,
            looping: false,
            volume: DEFAULT_VOLUME,
            preload: true,
        })
    }
}

fn background_spec() -> AudioSpec {
    AudioSpec {
        path: BACKGROUND_MUSIC_ASSET,
        looping: true,
        volume: DEFAULT_VOLUME,
        preload: true,
    }
}

/// App-wide sound context. Create one per app and pass it where needed.
pub struct SoundManager<B: AudioBackend, S: KeyValueStore> {
    backend: B,
    store: S,
    muted: bool,
    background: Option<B::Handle>,
    effects: BTreeMap<SoundKind, B::Handle>,
}

impl<B: AudioBackend, S: KeyValueStore> SoundManager<B, S> {
    /// Restores the persisted mute flag; missing or malformed reads as unmuted.
    pub fn new(mut backend: B, store: S) -> Self {
        let muted = read_or_none(&store, MUTE_KEY)
            .and_then(|raw| serde_json::from_str::<bool>(&raw).ok())
            .unwrap_or(false);
        backend.set_global_mute(muted);
        Self {
            backend,
            store,
            muted,
            background: None,
            effects: BTreeMap::new(),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.set_mute(!self.muted);
        self.muted
    }

    /// Persists `muted` and applies it to every live handle and the backend.
    pub fn set_mute(&mut self, muted: bool) {
        self.muted = muted;
        write_logged(&self.store, MUTE_KEY, if muted { "true" } else { "false" });

        if let Some(background) = self.background.as_mut() {
            background.set_muted(muted);
        }
        for handle in self.effects.values_mut() {
            handle.set_muted(muted);
        }
        self.backend.set_global_mute(muted);
        log::info!("event=sound_mute module=sound status=ok muted={muted}");
    }

    /// Plays a short effect unless muted or already playing.
    pub fn play_sfx(&mut self, kind: SoundKind) {
        if self.muted {
            return;
        }
        let Some(spec) = kind.spec() else {
            return;
        };

        if !self.effects.contains_key(&kind) {
            match self.backend.load(&spec) {
                Ok(mut handle) => {
                    handle.set_muted(self.muted);
                    self.effects.insert(kind, handle);
                }
                Err(err) => {
                    log::warn!(
                        "event=sound_load module=sound status=error kind={} error={}",
                        kind.as_str(),
                        err
                    );
                    return;
                }
            }
        }

        let Some(handle) = self.effects.get_mut(&kind) else {
            return;
        };
        if handle.is_playing() {
            return;
        }
        if let Err(err) = handle.play() {
            log::warn!(
                "event=sound_play module=sound status=error kind={} error={}",
                kind.as_str(),
                err
            );
        }
    }

    pub fn is_background_playing(&self) -> bool {
        self.background
            .as_ref()
            .is_some_and(|handle| handle.is_playing())
    }

    /// Starts the looping background track; a no-op while it plays.
    ///
    /// A suspended output is resumed first. If resuming fails nothing plays
    /// and a later call tries again.
    pub fn start_background_music(&mut self) {
        if self.is_background_playing() {
            return;
        }

        if self.background.is_none() {
            match self.backend.load(&background_spec()) {
                Ok(mut handle) => {
                    handle.set_volume(DEFAULT_VOLUME);
                    handle.set_muted(self.muted);
                    self.background = Some(handle);
                }
                Err(err) => {
                    log::warn!(
                        "event=bg_music_load module=sound status=error error={}",
                        err
                    );
                    return;
                }
            }
        }

        if self.backend.output_state() == OutputState::Suspended {
            if let Err(err) = self.backend.resume_output() {
                log::warn!(
                    "event=audio_resume module=sound status=error error={}",
                    err
                );
                return;
            }
        }

        let Some(background) = self.background.as_mut() else {
            return;
        };
        match background.play() {
            Ok(()) => log::info!("event=bg_music_start module=sound status=ok"),
            Err(err) => log::warn!(
                "event=bg_music_start module=sound status=error error={}",
                err
            ),
        }
    }

    /// Stops and unloads every handle. Safe to call more than once.
    pub fn teardown(&mut self) {
        let mut released = 0usize;
        if let Some(mut background) = self.background.take() {
            background.stop();
            background.unload();
            released += 1;
        }
        for (_, mut handle) in std::mem::take(&mut self.effects) {
            handle.stop();
            handle.unload();
            released += 1;
        }
        if released > 0 {
            log::debug!("event=sound_teardown module=sound status=ok released={released}");
        }
    }
}

impl<B: AudioBackend, S: KeyValueStore> Drop for SoundManager<B, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Backend for hosts without audio output. Loads succeed and nothing plays.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentHandle;

impl AudioHandle for SilentHandle {
    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn is_playing(&self) -> bool {
        false
    }

    fn set_muted(&mut self, _muted: bool) {}

    fn set_volume(&mut self, _volume: f32) {}

    fn unload(&mut self) {}
}

impl AudioBackend for SilentBackend {
    type Handle = SilentHandle;

    fn load(&mut self, _spec: &AudioSpec) -> Result<Self::Handle, AudioError> {
        Ok(SilentHandle)
    }

    fn output_state(&self) -> OutputState {
        OutputState::Running
    }

    fn resume_output(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_global_mute(&mut self, _muted: bool) {}
}
