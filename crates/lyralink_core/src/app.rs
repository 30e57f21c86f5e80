//! App context wiring storage, clock and sound together.
//!
//! # Responsibility
//! - Open the configured key-value backend once.
//! - Own the single sound manager and the per-session visit log.
//! - Hand out list services that share the same store and clock.

use crate::clock::{Clock, SystemClock};
use crate::config::{CoreConfig, StorageBackend};
use crate::counters::{Click, DailyClicks, Visit, VisitLog};
use crate::daily::daily_note;
use crate::elapsed::{load_or_init_anchor, love_days, love_start};
use crate::gate::{Gate, PasswordPrompt};
use crate::kv::{KeyValueStore, KvError, MemoryStore, SqliteKvStore};
use crate::service::bucket::BucketList;
use crate::service::letters::LetterArchive;
use crate::service::quiz::QuizBook;
use crate::service::reasons::ReasonList;
use crate::service::timeline::Timeline;
use crate::sound::{AudioBackend, SoundKind, SoundManager};
use crate::timer::ElapsedTicker;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type SharedStore = Rc<dyn KeyValueStore>;
pub type SharedClock = Rc<dyn Clock>;

/// How long the boot screen stays up before the entry prompt.
pub const BOOT_SCREEN_MS: i64 = 3_500;

#[derive(Debug)]
pub enum AppError {
    DataDir(std::io::Error),
    Store(KvError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataDir(err) => write!(f, "failed to create data dir: {err}"),
            Self::Store(err) => write!(f, "failed to open store: {err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DataDir(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<KvError> for AppError {
    fn from(value: KvError) -> Self {
        Self::Store(value)
    }
}

pub struct LyraApp<B: AudioBackend> {
    config: CoreConfig,
    store: SharedStore,
    clock: SharedClock,
    sound: SoundManager<B, SharedStore>,
    visits: VisitLog<SharedStore>,
    clicks: DailyClicks<SharedStore, SharedClock>,
}

impl<B: AudioBackend> LyraApp<B> {
    /// Opens the configured store with the system clock.
    pub fn open(config: CoreConfig, backend: B) -> Result<Self, AppError> {
        Self::open_with_clock(config, backend, Rc::new(SystemClock))
    }

    pub fn open_with_clock(
        config: CoreConfig,
        backend: B,
        clock: SharedClock,
    ) -> Result<Self, AppError> {
        let store: SharedStore = match config.storage {
            StorageBackend::Sqlite => {
                std::fs::create_dir_all(&config.data_dir).map_err(AppError::DataDir)?;
                Rc::new(SqliteKvStore::open(config.db_path())?)
            }
            StorageBackend::Memory => Rc::new(MemoryStore::new()),
        };
        Ok(Self::with_parts(config, backend, store, clock))
    }

    /// Builds the context over an already opened store.
    pub fn with_parts(config: CoreConfig, backend: B, store: SharedStore, clock: SharedClock) -> Self {
        log::info!(
            "event=app_open module=app status=ok storage={:?}",
            config.storage
        );
        Self {
            sound: SoundManager::new(backend, Rc::clone(&store)),
            visits: VisitLog::new(Rc::clone(&store)),
            clicks: DailyClicks::new(Rc::clone(&store), Rc::clone(&clock)),
            config,
            store,
            clock,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn store(&self) -> SharedStore {
        Rc::clone(&self.store)
    }

    pub fn clock(&self) -> SharedClock {
        Rc::clone(&self.clock)
    }

    pub fn sound(&self) -> &SoundManager<B, SharedStore> {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut SoundManager<B, SharedStore> {
        &mut self.sound
    }

    /// Entry gesture: forces sound on, plays the entrance cues, starts the
    /// music and counts the visit.
    pub fn enter(&mut self) -> Option<Visit> {
        self.sound.set_mute(false);
        self.sound.play_sfx(SoundKind::Success);
        self.sound.play_sfx(SoundKind::Entrance);
        self.sound.play_sfx(SoundKind::Chime);
        self.sound.start_background_music();
        self.visits.record_visit()
    }

    /// Logo click: counts toward the secret archive.
    pub fn click_logo(&mut self) -> Click {
        self.sound.play_sfx(SoundKind::UiClick);
        self.clicks.click()
    }

    pub fn timeline(&self) -> Timeline<SharedStore, SharedClock> {
        Timeline::open(self.store(), self.clock())
    }

    pub fn letters(&self) -> LetterArchive<SharedStore, SharedClock> {
        LetterArchive::open(self.store(), self.clock())
    }

    pub fn quiz(&self) -> QuizBook<SharedStore, SharedClock> {
        QuizBook::open(self.store(), self.clock())
    }

    pub fn bucket(&self) -> BucketList<SharedStore, SharedClock> {
        BucketList::open(self.store(), self.clock())
    }

    pub fn reasons(&self) -> ReasonList<SharedStore, SharedClock> {
        ReasonList::open(self.store(), self.clock())
    }

    pub fn gate(&self) -> Gate {
        Gate
    }

    pub fn password_prompt(&self) -> PasswordPrompt {
        PasswordPrompt::new()
    }

    /// Ticker for the time-together display, anchored on the stored date.
    pub fn elapsed_ticker(&self) -> ElapsedTicker {
        ElapsedTicker::new(load_or_init_anchor(&self.store, &self.clock))
    }

    pub fn daily_note(&self) -> &'static str {
        daily_note(&self.clock)
    }

    pub fn love_days(&self) -> i64 {
        love_days(love_start(), self.clock.now())
    }
}
