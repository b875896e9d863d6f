//! Widget settings
//!
//! Read once at startup from their own key, separate from the leaderboard.

use serde::Deserialize;

use crate::leaderboard::DEFAULT_STORAGE_KEY;
use crate::persistence::KeyValueStore;

/// Refresh interval bounds (ms)
pub const MIN_TICK_INTERVAL_MS: u32 = 1;
pub const MAX_TICK_INTERVAL_MS: u32 = 1000;

/// Widget preferences
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the leaderboard is stored under
    pub storage_key: String,
    /// Display refresh interval while running (ms)
    pub tick_interval_ms: u32,
    /// Ask before deleting an entry
    pub confirm_delete: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            tick_interval_ms: 10,
            confirm_delete: true,
        }
    }
}

impl Settings {
    /// Storage key for settings
    pub const STORAGE_KEY: &'static str = "house_timer_settings";

    /// Refresh interval clamped to sane bounds
    pub fn effective_tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
            .clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS)
    }

    /// Load settings, falling back to defaults
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    if settings.storage_key.trim().is_empty() {
                        settings.storage_key = DEFAULT_STORAGE_KEY.to_string();
                    }
                    log::info!("Loaded settings");
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring unreadable settings: {}", err);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Settings unavailable, using defaults: {}", err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.storage_key, "data");
        assert_eq!(settings.tick_interval_ms, 10);
        assert!(settings.confirm_delete);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let store = MemoryStore::with_item(Settings::STORAGE_KEY, r#"{"confirm_delete":false}"#);
        let settings = Settings::load(&store);
        assert!(!settings.confirm_delete);
        assert_eq!(settings.storage_key, "data");
        assert_eq!(settings.tick_interval_ms, 10);
    }

    #[test]
    fn test_unreadable_settings_use_defaults() {
        let store = MemoryStore::with_item(Settings::STORAGE_KEY, "{{{");
        assert_eq!(Settings::load(&store), Settings::default());

        let store = MemoryStore::with_item(Settings::STORAGE_KEY, r#"{"storage_key":"  "}"#);
        assert_eq!(Settings::load(&store).storage_key, "data");
    }

    #[test]
    fn test_load_stored_settings() {
        let store = MemoryStore::with_item(
            Settings::STORAGE_KEY,
            r#"{"storage_key":"relay","tick_interval_ms":50,"confirm_delete":false}"#,
        );
        let expected = Settings {
            storage_key: "relay".into(),
            tick_interval_ms: 50,
            confirm_delete: false,
        };
        assert_eq!(Settings::load(&store), expected);
    }

    #[test]
    fn test_unreadable_store_uses_defaults() {
        let mut store = MemoryStore::with_item(Settings::STORAGE_KEY, r#"{"confirm_delete":false}"#);
        store.set_fail_reads(true);
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_tick_interval_clamped() {
        let mut settings = Settings::default();
        settings.tick_interval_ms = 0;
        assert_eq!(settings.effective_tick_interval_ms(), 1);
        settings.tick_interval_ms = 60_000;
        assert_eq!(settings.effective_tick_interval_ms(), 1000);
    }
}
