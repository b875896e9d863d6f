//! House Timer - a stopwatch with a house leaderboard
//!
//! Core modules:
//! - `timer`: Stopwatch state machine
//! - `leaderboard`: Sorted, persisted list of saved times
//! - `session`: UI event handling and the render model
//! - `persistence`: Key-value store abstraction
//! - `platform`: Browser/native clock, storage and refresh interval

pub mod advisory;
pub mod entry;
pub mod error;
pub mod format;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod timer;

pub use advisory::{Advisory, Severity};
pub use entry::{House, ScoreEntry};
pub use error::{LeaderboardError, StoreError};
pub use format::{format_elapsed, parse_elapsed};
pub use leaderboard::{Leaderboard, LoadOutcome};
pub use persistence::{KeyValueStore, MemoryStore};
pub use platform::{Clock, ManualClock, SystemClock};
pub use session::{RowView, Session, SessionView, UiEvent};
pub use settings::Settings;
pub use timer::{TimerEngine, TimerPhase};
