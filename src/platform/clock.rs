//! Millisecond clocks

use std::cell::Cell;
use std::rc::Rc;

/// Source of the current instant in milliseconds
///
/// Only differences between readings matter.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Monotonic clock: `performance.now()` on web, `Instant` natively
#[derive(Debug, Clone)]
pub struct SystemClock {
    /// None when the page exposes no Performance API; `Date.now()` is used then
    #[cfg(target_arch = "wasm32")]
    performance: Option<web_sys::Performance>,
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            performance: web_sys::window().and_then(|w| w.performance()),
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> u64 {
        match &self.performance {
            Some(performance) => performance.now() as u64,
            None => js_sys::Date::now() as u64,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock; clones share the same instant
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
