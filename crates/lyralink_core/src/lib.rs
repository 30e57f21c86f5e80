//! Core logic for the LyraLink site.
//! Persisted lists, date math, the access gate and sound state live here;
//! rendering is left to the host.

pub mod app;
pub mod clock;
pub mod config;
pub mod counters;
pub mod daily;
pub mod elapsed;
pub mod gate;
pub mod kv;
pub mod list;
pub mod logging;
pub mod model;
pub mod mood;
pub mod service;
pub mod sound;
pub mod timer;

pub use app::{AppError, LyraApp, SharedClock, SharedStore};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CoreConfig, LogLevel, StorageBackend};
pub use daily::{day_of_year, select_daily};
pub use elapsed::{elapsed, Elapsed};
pub use gate::{Gate, GatePass, PasswordPrompt};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryStore, SqliteKvStore};
pub use list::{ListSchema, ListStore, MigrationStep, PersistedList};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::{ListRecord, RecordId, RecordValidationError};
pub use mood::Mood;
pub use sound::{AudioBackend, AudioHandle, SoundKind, SoundManager};
pub use timer::{Scheduler, TimerHandle};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
