use std::collections::HashSet;

use confessions_types::{Confession, ConfessionId};
use tracing::{debug, info, warn};

use super::storage::Storage;
use crate::error::{AppError, AppResult};

/// Ordered confession list mirrored to a single storage slot.
///
/// Records are kept newest-first in insertion order. Every mutation that
/// changes the list rewrites the whole slot; write failures are logged and
/// the in-memory list stays authoritative.
pub struct ConfessionStore<S> {
    storage: S,
    slot_key: String,
    records: Vec<Confession>,
}

impl<S: Storage> ConfessionStore<S> {
    /// Load the list from `slot_key`. Never fails: an absent, unreadable or
    /// malformed slot yields an empty store.
    pub fn load(storage: S, slot_key: impl Into<String>) -> Self {
        let slot_key = slot_key.into();
        let records = match read_slot(&storage, &slot_key) {
            Ok(records) => {
                info!("Loaded {} confessions from slot '{}'", records.len(), slot_key);
                records
            }
            Err(e) => {
                warn!("{}; starting with an empty list", e);
                Vec::new()
            }
        };

        Self {
            storage,
            slot_key,
            records,
        }
    }

    /// Add a confession at the front of the list.
    pub fn submit(&mut self, text: &str) -> AppResult<&Confession> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyInput);
        }

        let confession = Confession::new(text);
        debug!("Submitted confession {}", confession.id);
        self.records.insert(0, confession);
        self.persist();
        Ok(&self.records[0])
    }

    /// Flip the read flag. Returns the new value, `None` if no record matched.
    pub fn toggle_read(&mut self, id: &ConfessionId) -> Option<bool> {
        let record = self.records.iter_mut().find(|c| &c.id == id)?;
        record.read = !record.read;
        let read = record.read;
        debug!("Confession {} marked {}", id, if read { "read" } else { "unread" });
        self.persist();
        Some(read)
    }

    /// Remove a record, returning it if it existed.
    pub fn delete(&mut self, id: &ConfessionId) -> Option<Confession> {
        let index = self.records.iter().position(|c| &c.id == id)?;
        let removed = self.records.remove(index);
        debug!("Deleted confession {}", id);
        self.persist();
        Some(removed)
    }

    pub fn get(&self, id: &ConfessionId) -> Option<&Confession> {
        self.records.iter().find(|c| &c.id == id)
    }

    /// Newest first.
    pub fn records(&self) -> &[Confession] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|c| c.is_unread()).count()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Rewrite the full list into the slot.
    pub fn save(&self) -> AppResult<()> {
        let blob = serde_json::to_string(&self.records)
            .map_err(|e| AppError::persistence_write(e.to_string()))?;
        self.storage.set_item(&self.slot_key, &blob)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("{}; keeping in-memory state", e);
        }
    }
}

fn read_slot<S: Storage>(storage: &S, key: &str) -> AppResult<Vec<Confession>> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(Vec::new());
    };
    let parsed: Vec<Confession> = serde_json::from_str(&raw)
        .map_err(|e| AppError::persistence_read(format!("slot '{}': {}", key, e)))?;
    Ok(retain_valid(parsed))
}

/// Drop records that would break the store invariants: blank text or an id
/// already seen earlier in the list.
fn retain_valid(records: Vec<Confession>) -> Vec<Confession> {
    let mut seen = HashSet::new();
    let total = records.len();
    let kept: Vec<Confession> = records
        .into_iter()
        .filter(|c| !c.text.trim().is_empty() && seen.insert(c.id.clone()))
        .collect();
    if kept.len() != total {
        warn!(
            "Dropped {} persisted confessions with blank text or duplicate ids",
            total - kept.len()
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use std::sync::Arc;

    const SLOT: &str = "confessions_black_gold";

    /// Reads fine, refuses every write.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> AppResult<Option<String>> {
            Ok(None)
        }

        fn set_item(&self, key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::persistence_write(format!("slot '{}' is read-only", key)))
        }
    }

    fn empty_store() -> ConfessionStore<Arc<MemoryStorage>> {
        ConfessionStore::load(Arc::new(MemoryStorage::new()), SLOT)
    }

    #[test]
    fn test_submit_prepends_unread_trimmed() {
        let mut store = empty_store();
        store.submit("first").unwrap();
        let second = store.submit("  second  ").unwrap().clone();

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0], second);
        assert_eq!(second.text, "second");
        assert!(!second.read);
        assert_eq!(store.records()[1].text, "first");
    }

    #[test]
    fn test_submit_rejects_blank() {
        let mut store = empty_store();
        assert!(matches!(store.submit(""), Err(AppError::EmptyInput)));
        assert!(matches!(store.submit("   \n\t"), Err(AppError::EmptyInput)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_flag() {
        let mut store = empty_store();
        let id = store.submit("x").unwrap().id.clone();

        assert_eq!(store.toggle_read(&id), Some(true));
        assert_eq!(store.unread_count(), 0);
        assert_eq!(store.toggle_read(&id), Some(false));
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut store = empty_store();
        store.submit("x").unwrap();
        let ghost = ConfessionId::from("ghost");

        assert_eq!(store.toggle_read(&ghost), None);
        assert!(store.delete(&ghost).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_twice() {
        let mut store = empty_store();
        let id = store.submit("x").unwrap().id.clone();
        store.submit("y").unwrap();

        assert!(store.delete(&id).is_some());
        assert_eq!(store.len(), 1);
        assert!(store.delete(&id).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_every_mutation_rewrites_slot() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ConfessionStore::load(Arc::clone(&storage), SLOT);
        let id = store.submit("x").unwrap().id.clone();
        store.toggle_read(&id);

        let blob = storage.get_item(SLOT).unwrap().unwrap();
        let persisted: Vec<Confession> = serde_json::from_str(&blob).unwrap();
        assert_eq!(persisted, store.records());
        assert!(persisted[0].read);

        store.delete(&id);
        assert_eq!(storage.get_item(SLOT).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_failures_keep_in_memory_state() {
        let mut store = ConfessionStore::load(ReadOnlyStorage, SLOT);
        assert!(store.save().is_err());

        let kept = store.submit("kept").unwrap().id.clone();
        let gone = store.submit("gone").unwrap().id.clone();
        assert_eq!(store.len(), 2);

        assert_eq!(store.toggle_read(&kept), Some(true));
        assert!(store.get(&kept).unwrap().read);
        assert_eq!(store.unread_count(), 1);

        assert_eq!(store.delete(&gone).unwrap().text, "gone");
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, kept);
    }

    #[test]
    fn test_reload_reproduces_list() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ConfessionStore::load(Arc::clone(&storage), SLOT);
        for text in ["a", "b", "c"] {
            store.submit(text).unwrap();
        }
        let middle = store.records()[1].id.clone();
        store.toggle_read(&middle);

        let reloaded = ConfessionStore::load(Arc::clone(&storage), SLOT);
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn test_malformed_slot_degrades_to_empty() {
        let storage = MemoryStorage::new().with_item(SLOT, "{not json");
        let store = ConfessionStore::load(storage, SLOT);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_drops_blank_and_duplicate_records() {
        let blob = r#"[
            {"id":"1","text":"kept","createdAt":"2024-05-01T12:30:00.000Z","read":false},
            {"id":"2","text":"   ","createdAt":"2024-05-01T12:29:00.000Z","read":false},
            {"id":"1","text":"dupe","createdAt":"2024-05-01T12:28:00.000Z","read":true}
        ]"#;
        let store = ConfessionStore::load(MemoryStorage::new().with_item(SLOT, blob), SLOT);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].text, "kept");
    }

    #[test]
    fn test_legacy_timestamp_ids_survive() {
        let blob = r#"[{"id":"1714566600123","text":"old","createdAt":"2024-05-01T12:30:00.123Z","read":true}]"#;
        let mut store = ConfessionStore::load(MemoryStorage::new().with_item(SLOT, blob), SLOT);
        let id = ConfessionId::from("1714566600123");
        assert_eq!(store.toggle_read(&id), Some(false));
        assert_eq!(store.unread_count(), 1);
    }
}
