//! Time leaderboard
//!
//! Persisted as one JSON array under a fixed key, sorted fastest first.
//! Every mutation rewrites the whole blob through [`Leaderboard::save`].

use crate::entry::ScoreEntry;
use crate::error::{LeaderboardError, Result, StoreError};
use crate::persistence::KeyValueStore;

/// Default storage key
pub const DEFAULT_STORAGE_KEY: &str = "data";

/// Suffix for the key an unreadable blob is moved aside to
const CORRUPT_SUFFIX: &str = ".corrupt";

/// Result of a lenient load
#[derive(Debug)]
pub struct LoadOutcome {
    /// Sorted entries; empty when the store could not be read
    pub entries: Vec<ScoreEntry>,
    /// Why nothing was read, if anything went wrong
    pub issue: Option<StoreError>,
}

/// Leaderboard bound to a store and key
#[derive(Debug)]
pub struct Leaderboard<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Leaderboard<S> {
    /// Leaderboard under the default key
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key an unreadable blob is copied to before it can be overwritten
    pub fn corrupt_key(&self) -> String {
        format!("{}{}", self.key, CORRUPT_SUFFIX)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load entries, reporting why nothing could be read
    ///
    /// A missing key is an empty leaderboard, not an error.
    pub fn try_load(&self) -> std::result::Result<Vec<ScoreEntry>, StoreError> {
        let Some(json) = self.store.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        let mut entries: Vec<ScoreEntry> =
            serde_json::from_str(&json).map_err(StoreError::Corrupt)?;
        sort_entries(&mut entries);
        Ok(entries)
    }

    /// Load entries, falling back to an empty list
    ///
    /// A corrupt blob is copied to [`Self::corrupt_key`] first so the next
    /// save does not destroy it. The returned issue says why the list is empty.
    pub fn load(&mut self) -> LoadOutcome {
        match self.try_load() {
            Ok(entries) => {
                log::info!("Loaded {} scores", entries.len());
                LoadOutcome {
                    entries,
                    issue: None,
                }
            }
            Err(err) => {
                log::warn!("Starting with an empty leaderboard: {}", err);
                if matches!(err, StoreError::Corrupt(_)) {
                    self.quarantine();
                }
                LoadOutcome {
                    entries: Vec::new(),
                    issue: Some(err),
                }
            }
        }
    }

    /// Copy the current blob aside. Failures are logged only.
    fn quarantine(&mut self) {
        let backup = self.corrupt_key();
        match self.store.get_item(&self.key) {
            Ok(Some(raw)) => match self.store.set_item(&backup, &raw) {
                Ok(()) => log::warn!("Unreadable scores moved to '{}'", backup),
                Err(err) => log::error!("Could not back up unreadable scores: {}", err),
            },
            Ok(None) => {}
            Err(err) => log::error!("Could not back up unreadable scores: {}", err),
        }
    }

    /// Sort, persist and return the list to display
    ///
    /// On failure the stored snapshot is unchanged and nothing is returned,
    /// so the caller keeps its previous list.
    pub fn save(&mut self, mut entries: Vec<ScoreEntry>) -> Result<Vec<ScoreEntry>> {
        sort_entries(&mut entries);
        let json = serde_json::to_string(&entries).map_err(StoreError::Encode)?;
        self.store.set_item(&self.key, &json)?;
        log::info!("Scores saved ({} entries)", entries.len());
        Ok(entries)
    }

    /// Validate and add an entry
    ///
    /// Zero time is checked before the name; neither failure writes.
    pub fn append(&mut self, entries: &[ScoreEntry], entry: ScoreEntry) -> Result<Vec<ScoreEntry>> {
        let entry = validate(entry)?;
        log::info!("Saving entry: {} {}", entry.name, entry.time);
        let mut next = Vec::with_capacity(entries.len() + 1);
        next.extend_from_slice(entries);
        next.push(entry);
        self.save(next)
    }

    /// Remove the entry at `index`
    pub fn remove(&mut self, entries: &[ScoreEntry], index: usize) -> Result<Vec<ScoreEntry>> {
        if index >= entries.len() {
            return Err(LeaderboardError::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }
        log::info!("Removing entry {} of {}", index, entries.len());
        let next = entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| e.clone())
            .collect();
        self.save(next)
    }
}

/// Stable ascending sort by time
pub fn sort_entries(entries: &mut [ScoreEntry]) {
    entries.sort_by_key(|e| e.time);
}

/// Check an entry is saveable, trimming its name
pub fn validate(mut entry: ScoreEntry) -> Result<ScoreEntry> {
    if entry.time == 0 {
        return Err(LeaderboardError::EmptyTime);
    }
    let trimmed = entry.name.trim();
    if trimmed.is_empty() {
        return Err(LeaderboardError::MissingName);
    }
    if trimmed.len() != entry.name.len() {
        entry.name = trimmed.to_string();
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::House;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn board() -> Leaderboard<MemoryStore> {
        Leaderboard::new(MemoryStore::new())
    }

    fn times(entries: &[ScoreEntry]) -> Vec<u64> {
        entries.iter().map(|e| e.time).collect()
    }

    #[test]
    fn test_load_empty_store() {
        let mut lb = board();
        assert!(lb.try_load().unwrap().is_empty());
        let loaded = lb.load();
        assert!(loaded.entries.is_empty());
        assert!(loaded.issue.is_none());
    }

    #[test]
    fn test_load_sorts_unsorted_blob() {
        let blob = r#"[{"name":"B","time":"300"},{"name":"A","time":"100"},{"name":"C","time":"200","house":"blue"}]"#;
        let mut lb = Leaderboard::new(MemoryStore::with_item("data", blob));
        let entries = lb.load().entries;
        assert_eq!(times(&entries), vec![100, 200, 300]);
        assert_eq!(entries[1].house, Some(House::Blue));
    }

    #[test]
    fn test_corrupt_blob_is_quarantined() {
        let mut lb = Leaderboard::new(MemoryStore::with_item("data", "not json"));
        assert!(matches!(lb.try_load(), Err(StoreError::Corrupt(_))));
        let loaded = lb.load();
        assert!(loaded.entries.is_empty());
        assert!(matches!(loaded.issue, Some(StoreError::Corrupt(_))));
        assert_eq!(lb.store().raw("data.corrupt"), Some("not json"));

        // The next save writes a fresh list but the backup survives
        let saved = lb.append(&[], ScoreEntry::new("A", 10, None)).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(lb.store().raw("data.corrupt"), Some("not json"));
    }

    #[test]
    fn test_unreadable_store_loads_empty() {
        let mut store = MemoryStore::with_item("data", r#"[{"name":"A","time":"1"}]"#);
        store.set_fail_reads(true);
        let mut lb = Leaderboard::new(store);
        assert!(matches!(lb.try_load(), Err(StoreError::Unavailable(_))));
        let loaded = lb.load();
        assert!(loaded.entries.is_empty());
        assert!(matches!(loaded.issue, Some(StoreError::Unavailable(_))));
        // Nothing to set aside when the store itself is unreadable
        assert!(lb.store().raw("data.corrupt").is_none());
    }

    #[test]
    fn test_save_writes_sorted_json() {
        let mut lb = board();
        let saved = lb
            .save(vec![
                ScoreEntry::new("Slow", 900, None),
                ScoreEntry::new("Fast", 100, Some(House::Green)),
            ])
            .unwrap();
        assert_eq!(saved[0].name, "Fast");
        assert_eq!(
            lb.store().raw("data"),
            Some(r#"[{"name":"Fast","time":"100","house":"green"},{"name":"Slow","time":"900"}]"#)
        );
    }

    #[test]
    fn test_save_is_stable_for_equal_times() {
        let mut lb = board();
        let saved = lb
            .save(vec![
                ScoreEntry::new("First", 500, None),
                ScoreEntry::new("Second", 500, None),
                ScoreEntry::new("Quick", 10, None),
            ])
            .unwrap();
        let names: Vec<_> = saved.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Quick", "First", "Second"]);
    }

    #[test]
    fn test_append_validation_does_not_write() {
        let mut lb = board();
        let existing = lb.save(vec![ScoreEntry::new("A", 50, None)]).unwrap();
        let before = lb.store().raw("data").map(str::to_string);

        let err = lb.append(&existing, ScoreEntry::new("", 100, None)).unwrap_err();
        assert!(matches!(err, LeaderboardError::MissingName));
        let err = lb.append(&existing, ScoreEntry::new("   ", 100, None)).unwrap_err();
        assert!(matches!(err, LeaderboardError::MissingName));
        let err = lb.append(&existing, ScoreEntry::new("B", 0, None)).unwrap_err();
        assert!(matches!(err, LeaderboardError::EmptyTime));
        // Zero time is reported ahead of a missing name
        let err = lb.append(&existing, ScoreEntry::new("", 0, None)).unwrap_err();
        assert!(matches!(err, LeaderboardError::EmptyTime));

        assert_eq!(lb.store().raw("data").map(str::to_string), before);
    }

    #[test]
    fn test_append_trims_name_and_allows_duplicates() {
        let mut lb = board();
        let list = lb.append(&[], ScoreEntry::new("  Ravenclaw ", 200, None)).unwrap();
        let list = lb.append(&list, ScoreEntry::new("Ravenclaw", 100, None)).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|e| e.name == "Ravenclaw"));
        assert_eq!(times(&list), vec![100, 200]);
    }

    #[test]
    fn test_append_failed_write() {
        let mut lb = board();
        let list = lb.append(&[], ScoreEntry::new("A", 100, None)).unwrap();
        lb.store_mut().set_fail_writes(true);
        let err = lb.append(&list, ScoreEntry::new("B", 50, None)).unwrap_err();
        assert!(matches!(err, LeaderboardError::StoreUnavailable(_)));

        lb.store_mut().set_fail_writes(false);
        assert_eq!(lb.try_load().unwrap(), list);
    }

    #[test]
    fn test_remove() {
        let mut lb = board();
        let list = lb
            .save(vec![
                ScoreEntry::new("A", 100, None),
                ScoreEntry::new("B", 200, None),
                ScoreEntry::new("C", 300, None),
            ])
            .unwrap();

        let list = lb.remove(&list, 1).unwrap();
        assert_eq!(times(&list), vec![100, 300]);
        assert_eq!(lb.try_load().unwrap(), list);

        // Same index again hits whatever moved into that slot
        let list = lb.remove(&list, 1).unwrap();
        assert_eq!(times(&list), vec![100]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut lb = board();
        let list = lb.save(vec![ScoreEntry::new("A", 100, None)]).unwrap();
        let err = lb.remove(&list, 1).unwrap_err();
        assert!(matches!(err, LeaderboardError::IndexOutOfRange { index: 1, len: 1 }));
        let err = lb.remove(&[], 0).unwrap_err();
        assert!(matches!(err, LeaderboardError::IndexOutOfRange { index: 0, len: 0 }));
        assert_eq!(lb.try_load().unwrap().len(), 1);
    }

    #[test]
    fn test_custom_key() {
        let mut lb = Leaderboard::with_key(MemoryStore::new(), "relay");
        lb.append(&[], ScoreEntry::new("A", 1, None)).unwrap();
        assert!(lb.store().raw("relay").is_some());
        assert!(lb.store().raw("data").is_none());
        assert_eq!(lb.corrupt_key(), "relay.corrupt");
    }

    fn arb_entry() -> impl Strategy<Value = ScoreEntry> {
        ("[a-z]{1,8}", 1u64..10_000_000, proptest::option::of(0usize..4))
            .prop_map(|(name, time, house)| ScoreEntry::new(name, time, house.map(|i| House::ALL[i])))
    }

    proptest! {
        #[test]
        fn prop_append_then_load_is_sorted_superset(
            existing in proptest::collection::vec(arb_entry(), 0..20),
            new_entry in arb_entry(),
        ) {
            let mut lb = board();
            let list = lb.save(existing.clone()).unwrap();
            lb.append(&list, new_entry.clone()).unwrap();
            let loaded = lb.try_load().unwrap();

            prop_assert_eq!(loaded.len(), existing.len() + 1);
            prop_assert!(loaded.windows(2).all(|w| w[0].time <= w[1].time));

            let mut expected = existing;
            expected.push(new_entry);
            for e in &expected {
                let want = expected.iter().filter(|x| *x == e).count();
                let got = loaded.iter().filter(|x| *x == e).count();
                prop_assert_eq!(want, got);
            }
        }

        #[test]
        fn prop_remove_drops_exactly_one(
            existing in proptest::collection::vec(arb_entry(), 1..20),
            pick in any::<proptest::sample::Index>(),
        ) {
            let mut lb = board();
            let list = lb.save(existing).unwrap();
            let index = pick.index(list.len());
            let after = lb.remove(&list, index).unwrap();

            prop_assert_eq!(after.len(), list.len() - 1);
            let mut expected = list.clone();
            expected.remove(index);
            prop_assert_eq!(after, expected);
        }
    }
}
