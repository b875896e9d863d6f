//! Widget session
//!
//! Everything the page does goes through [`Session::handle`]: the shell
//! translates DOM events into [`UiEvent`]s and renders [`Session::view`].
//! No browser types appear here so the whole flow runs in native tests.

use crate::advisory::Advisory;
use crate::entry::{House, ScoreEntry};
use crate::error::{LeaderboardError, StoreError};
use crate::format::format_elapsed;
use crate::leaderboard::Leaderboard;
use crate::persistence::KeyValueStore;
use crate::platform::Clock;
use crate::settings::Settings;
use crate::timer::{TimerEngine, TimerPhase};

/// Input from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Start,
    Stop,
    Reset,
    /// Display refresh while running
    Tick,
    /// Save the current time under the pending team name and house
    Save,
    TeamNameChanged(String),
    HouseChanged(Option<House>),
    /// Delete the row at this index (asks first if confirmation is on)
    RequestDelete(usize),
    ConfirmDelete,
    CancelDelete,
    DismissAdvisory,
}

/// One leaderboard row, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    /// `MM:SS.CC`
    pub time: String,
    pub house: Option<House>,
    pub color: Option<&'static str>,
}

/// Everything the shell needs to draw a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Live `MM:SS.CC`
    pub display: String,
    pub phase: TimerPhase,
    pub team_name: String,
    pub house: Option<House>,
    /// None until the leaderboard has been loaded
    pub rows: Option<Vec<RowView>>,
    pub advisory: Option<Advisory>,
    /// Row awaiting delete confirmation
    pub pending_delete: Option<usize>,
}

/// Widget state
pub struct Session<S, C> {
    timer: TimerEngine,
    leaderboard: Leaderboard<S>,
    clock: C,
    settings: Settings,
    entries: Option<Vec<ScoreEntry>>,
    team_name: String,
    house: Option<House>,
    advisory: Option<Advisory>,
    pending_delete: Option<usize>,
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    /// Create a session; nothing is read until [`Session::load`]
    pub fn new(store: S, clock: C, settings: Settings) -> Self {
        let leaderboard = Leaderboard::with_key(store, settings.storage_key.clone());
        Self {
            timer: TimerEngine::new(),
            leaderboard,
            clock,
            settings,
            entries: None,
            team_name: String::new(),
            house: None,
            advisory: None,
            pending_delete: None,
        }
    }

    /// Read the leaderboard once at startup
    ///
    /// Unreadable data still yields an empty list, but the user is told.
    pub fn load(&mut self) {
        log::info!("loading scores");
        let loaded = self.leaderboard.load();
        self.advisory = match loaded.issue {
            Some(StoreError::Corrupt(_)) => Some(Advisory::warning(
                "Saved scores could not be read and were set aside",
            )),
            Some(err) => Some(Advisory::warning(format!(
                "Saved scores are unavailable: {}",
                err
            ))),
            None => None,
        };
        self.entries = Some(loaded.entries);
    }

    pub fn phase(&self) -> TimerPhase {
        self.timer.phase()
    }

    /// Whether the shell should keep a refresh interval armed
    pub fn needs_ticker(&self) -> bool {
        self.timer.is_running()
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.settings.effective_tick_interval_ms()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn elapsed(&self) -> u64 {
        self.timer.elapsed()
    }

    pub fn entries(&self) -> Option<&[ScoreEntry]> {
        self.entries.as_deref()
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    pub fn pending_delete(&self) -> Option<usize> {
        self.pending_delete
    }

    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    pub fn leaderboard_mut(&mut self) -> &mut Leaderboard<S> {
        &mut self.leaderboard
    }

    /// Apply one UI event
    pub fn handle(&mut self, event: UiEvent) {
        let now = self.clock.now_ms();
        match event {
            UiEvent::Start => self.timer.start(now),
            UiEvent::Stop => {
                self.timer.stop(now);
            }
            UiEvent::Tick => {
                self.timer.tick(now);
            }
            UiEvent::Reset => self.reset(),
            UiEvent::Save => self.save(now),
            UiEvent::TeamNameChanged(name) => self.team_name = name,
            UiEvent::HouseChanged(house) => self.house = house,
            UiEvent::RequestDelete(index) => self.request_delete(index),
            UiEvent::ConfirmDelete => {
                if let Some(index) = self.pending_delete.take() {
                    self.delete(index);
                }
            }
            UiEvent::CancelDelete => self.pending_delete = None,
            UiEvent::DismissAdvisory => self.advisory = None,
        }
    }

    fn reset(&mut self) {
        self.timer.reset();
        self.team_name.clear();
        self.house = None;
        self.advisory = None;
        self.pending_delete = None;
    }

    fn save(&mut self, now: u64) {
        let Some(entries) = self.entries.as_deref() else {
            self.advisory = Some(Advisory::error("data was null"));
            return;
        };

        // Saving mid-run records the time at the click; a rejected save
        // leaves the timer running
        let elapsed = self.timer.elapsed_at(now);
        let entry = ScoreEntry::new(self.team_name.clone(), elapsed, self.house);

        log::info!("saving Data");
        match self.leaderboard.append(entries, entry) {
            Ok(updated) => {
                self.timer.stop(now);
                let message = format!(
                    "Saved {} in {}",
                    self.team_name.trim(),
                    format_elapsed(elapsed)
                );
                self.entries = Some(updated);
                self.reset();
                self.advisory = Some(Advisory::success(message));
            }
            Err(err) => self.fail(err),
        }
    }

    fn request_delete(&mut self, index: usize) {
        let len = self.entries.as_ref().map_or(0, Vec::len);
        if index >= len {
            self.fail(LeaderboardError::IndexOutOfRange { index, len });
            return;
        }
        if self.settings.confirm_delete {
            self.pending_delete = Some(index);
        } else {
            self.delete(index);
        }
    }

    fn delete(&mut self, index: usize) {
        let Some(entries) = self.entries.as_deref() else {
            self.advisory = Some(Advisory::error("data was null"));
            return;
        };
        match self.leaderboard.remove(entries, index) {
            Ok(updated) => self.entries = Some(updated),
            Err(err) => self.fail(err),
        }
    }

    /// Surface an error; the in-memory list is left as it was
    fn fail(&mut self, err: LeaderboardError) {
        log::warn!("{}", err);
        self.advisory = Some(Advisory::from(&err));
    }

    /// Render model for the current instant
    pub fn view(&self) -> SessionView {
        let now = self.clock.now_ms();
        let rows = self.entries.as_ref().map(|entries| {
            entries
                .iter()
                .enumerate()
                .map(|(i, e)| RowView {
                    rank: i + 1,
                    name: e.name.clone(),
                    time: format_elapsed(e.time),
                    house: e.house,
                    color: e.color(),
                })
                .collect()
        });
        SessionView {
            display: format_elapsed(self.timer.elapsed_at(now)),
            phase: self.timer.phase(),
            team_name: self.team_name.clone(),
            house: self.house,
            rows,
            advisory: self.advisory.clone(),
            pending_delete: self.pending_delete,
        }
    }
}
