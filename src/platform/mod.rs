//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (`Date.now()` on web, `Instant` natively)
//! - Storage (LocalStorage on web)
//! - The display refresh interval (web only)

pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
