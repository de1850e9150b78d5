//! Gift record operations
//!
//! Gifts are the only dynamically-keyed records in the namespace; every
//! other store lives under a fixed key. Enumeration therefore scans all
//! keys and filters by prefix.

use tracing::warn;

use super::Store;
use crate::error::{CraftError, CraftResult};
use crate::types::gift::{CollaboratorLetter, GiftRecord};
use crate::types::GiftId;

/// Storage key prefix shared by all gift records
pub const GIFT_KEY_PREFIX: &str = "gift_";

impl Store {
    /// Write a new gift record under a freshly generated id.
    ///
    /// The record is stored with whatever `collaborators` it carries;
    /// creation paths pass an empty sequence. The id is regenerated on
    /// the (negligible) chance of a key collision.
    pub fn create_gift(&self, record: &GiftRecord) -> CraftResult<GiftId> {
        let mut id = GiftId::generate();
        while self.get(id.as_str())?.is_some() {
            id = GiftId::generate();
        }
        self.write_json(id.as_str(), record)?;
        Ok(id)
    }

    /// Load a gift by id.
    ///
    /// Returns `None` if no record exists for the given id.
    pub fn load_gift(&self, id: &GiftId) -> CraftResult<Option<GiftRecord>> {
        self.read_json(id.as_str())
    }

    /// Append a collaborator's letter to an existing gift.
    ///
    /// Fails with `GiftNotFound` if the id has no record - a stale
    /// collaboration link must never create a fresh gift. The append
    /// preserves arrival order and runs as a single read-modify-write
    /// transaction, so concurrent appends through this store cannot
    /// drop letters.
    pub fn append_letter(&self, id: &GiftId, letter: CollaboratorLetter) -> CraftResult<()> {
        self.update_entry(id.as_str(), move |existing| {
            let raw = existing.ok_or_else(|| CraftError::GiftNotFound(id.to_string()))?;
            let mut record: GiftRecord = serde_json::from_str(&raw)
                .map_err(|e| CraftError::Serialization(e.to_string()))?;
            record.collaborators.push(letter);
            serde_json::to_string(&record).map_err(|e| CraftError::Serialization(e.to_string()))
        })
    }

    /// Remove a gift. Deleting an absent id is not an error.
    pub fn delete_gift(&self, id: &GiftId) -> CraftResult<()> {
        self.remove(id.as_str())
    }

    /// All gift records, each tagged with its storage key.
    ///
    /// Ordering is the enumeration order of the underlying namespace,
    /// not chronological; callers needing recency sort by `created_at`.
    /// Records that fail to parse are skipped with a warning.
    pub fn list_gifts(&self) -> CraftResult<Vec<(GiftId, GiftRecord)>> {
        let mut gifts = Vec::new();
        for key in self.keys_with_prefix(GIFT_KEY_PREFIX)? {
            let Ok(id) = GiftId::parse(&key) else {
                warn!(key, "skipping gift with malformed key");
                continue;
            };
            match self.read_json::<GiftRecord>(&key) {
                Ok(Some(record)) => gifts.push((id, record)),
                Ok(None) => {}
                Err(e) => warn!(key, error = %e, "skipping unparseable gift record"),
            }
        }
        Ok(gifts)
    }

    /// The most recently created gifts, newest first.
    pub fn recent_gifts(&self, limit: usize) -> CraftResult<Vec<(GiftId, GiftRecord)>> {
        let mut gifts = self.list_gifts()?;
        gifts.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at));
        gifts.truncate(limit);
        Ok(gifts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::gift::MusicSelection;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn create_test_store() -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("test.redb")).unwrap();
        (store, temp_dir)
    }

    fn test_record(sender: &str) -> GiftRecord {
        GiftRecord {
            recipient_name: Some("Dina".to_string()),
            sender_name: sender.to_string(),
            message: "Happy Birthday".to_string(),
            moment_type: "Birthday".to_string(),
            effect_id: "none".to_string(),
            background_id: "bg1".to_string(),
            font_color_id: "white".to_string(),
            music_selection: None,
            image_data: None,
            created_at: Utc::now(),
            author_logged_in: false,
            collaborators: Vec::new(),
        }
    }

    fn test_letter(sender: &str, message: &str) -> CollaboratorLetter {
        CollaboratorLetter {
            sender_name: sender.to_string(),
            message: message.to_string(),
            image_data: None,
            created_at: Utc::now(),
            author_logged_in: false,
        }
    }

    #[test]
    fn test_create_and_load_gift() {
        let (store, _temp) = create_test_store();

        let id = store.create_gift(&test_record("Alice")).unwrap();
        assert!(id.as_str().starts_with("gift_"));

        let loaded = store.load_gift(&id).unwrap().unwrap();
        assert_eq!(loaded.sender_name, "Alice");
        assert!(loaded.collaborators.is_empty());
    }

    #[test]
    fn test_load_nonexistent_gift() {
        let (store, _temp) = create_test_store();
        let id = GiftId::generate();
        assert!(store.load_gift(&id).unwrap().is_none());
    }

    #[test]
    fn test_append_letter_preserves_order() {
        let (store, _temp) = create_test_store();
        let id = store.create_gift(&test_record("Alice")).unwrap();

        store.append_letter(&id, test_letter("Bob", "Congrats!")).unwrap();
        store.append_letter(&id, test_letter("Carol", "All the best")).unwrap();

        let loaded = store.load_gift(&id).unwrap().unwrap();
        let senders: Vec<&str> = loaded
            .collaborators
            .iter()
            .map(|l| l.sender_name.as_str())
            .collect();
        assert_eq!(senders, ["Bob", "Carol"]);
    }

    #[test]
    fn test_append_keeps_creator_fields() {
        let (store, _temp) = create_test_store();
        let mut record = test_record("Alice");
        record.music_selection = Some(MusicSelection::Default {
            name: "Happy Birthday Song 1".to_string(),
            src: "Assets/happy-birthday-334876.mp3".to_string(),
        });
        let id = store.create_gift(&record).unwrap();

        store.append_letter(&id, test_letter("Bob", "Congrats!")).unwrap();

        let loaded = store.load_gift(&id).unwrap().unwrap();
        assert_eq!(loaded.sender_name, "Alice");
        assert_eq!(loaded.message, "Happy Birthday");
        assert!(loaded.music_selection.is_some());
    }

    #[test]
    fn test_append_to_missing_gift_is_not_found() {
        let (store, _temp) = create_test_store();
        let id = GiftId::generate();

        let err = store.append_letter(&id, test_letter("Bob", "hi")).unwrap_err();
        assert!(matches!(err, CraftError::GiftNotFound(_)));
        // No record was conjured up by the failed append
        assert!(store.load_gift(&id).unwrap().is_none());
    }

    #[test]
    fn test_delete_gift_is_idempotent() {
        let (store, _temp) = create_test_store();
        let id = store.create_gift(&test_record("Alice")).unwrap();

        store.delete_gift(&id).unwrap();
        assert!(store.load_gift(&id).unwrap().is_none());
        // Deleting twice is not an error
        store.delete_gift(&id).unwrap();
    }

    #[test]
    fn test_list_gifts_tags_storage_keys() {
        let (store, _temp) = create_test_store();
        // Unrelated keys must not leak into the listing
        store.set("registeredUsers", "[]").unwrap();

        let id1 = store.create_gift(&test_record("Alice")).unwrap();
        let id2 = store.create_gift(&test_record("Bob")).unwrap();

        let gifts = store.list_gifts().unwrap();
        assert_eq!(gifts.len(), 2);
        let ids: Vec<&GiftId> = gifts.iter().map(|(id, _)| id).collect();
        assert!(ids.contains(&&id1));
        assert!(ids.contains(&&id2));
    }

    #[test]
    fn test_list_skips_unparseable_records() {
        let (store, _temp) = create_test_store();
        store.create_gift(&test_record("Alice")).unwrap();
        store.set("gift_1730000000000_badbadbad", "not json").unwrap();

        let gifts = store.list_gifts().unwrap();
        assert_eq!(gifts.len(), 1);
    }

    #[test]
    fn test_recent_gifts_sorted_newest_first() {
        let (store, _temp) = create_test_store();

        let mut old = test_record("Old");
        old.created_at = Utc::now() - Duration::days(2);
        let mut mid = test_record("Mid");
        mid.created_at = Utc::now() - Duration::days(1);
        let new = test_record("New");

        store.create_gift(&old).unwrap();
        store.create_gift(&new).unwrap();
        store.create_gift(&mid).unwrap();

        let recent = store.recent_gifts(2).unwrap();
        let senders: Vec<&str> = recent.iter().map(|(_, g)| g.sender_name.as_str()).collect();
        assert_eq!(senders, ["New", "Mid"]);
    }
}
