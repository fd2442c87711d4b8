//! Local mirror store.
//!
//! Persists the full event collection as a single JSON file, the same shape
//! the UI uses. Every mutation loads the whole collection, applies the
//! change and rewrites the file, so readers never observe a partial write.
//! Scoped to a single process; there is no locking.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{TerminError, TerminResult};
use crate::event::{Event, EventDraft};
use crate::store::EventStore;

const STORE_FILE: &str = "calendar_events.json";

/// JSON-file-backed event store with no ownership concept.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> Self {
        LocalStore { path }
    }

    /// Store file under the platform data dir, ~/.local/share/termin on Linux.
    pub fn default_path() -> TerminResult<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TerminError::Config("Could not determine data directory".into()))?
            .join("termin");

        Ok(data_dir.join(STORE_FILE))
    }

    /// Read the full collection. A missing file is the empty collection.
    fn load_all(&self) -> TerminResult<Vec<Event>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| TerminError::Serialization(e.to_string()))
    }

    /// Rewrite the full collection.
    fn save_all(&self, events: &[Event]) -> TerminResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(events)
            .map_err(|e| TerminError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for LocalStore {
    /// Events in insertion order, not sorted by start date.
    async fn list_events(&self) -> TerminResult<Vec<Event>> {
        self.load_all()
    }

    async fn insert_event(&self, draft: EventDraft) -> TerminResult<Event> {
        let mut events = self.load_all()?;

        let event = Event {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            location: draft.location,
            user_id: None,
            created_at: None,
        };

        events.push(event.clone());
        self.save_all(&events)?;

        Ok(event)
    }

    /// Replace-by-id; a no-op when the id is absent.
    async fn update_event(&self, id: &str, draft: EventDraft) -> TerminResult<()> {
        let mut events = self.load_all()?;

        if let Some(event) = events.iter_mut().find(|e| e.id == id) {
            event.apply(draft);
            self.save_all(&events)?;
        }

        Ok(())
    }

    /// Remove-by-id; a no-op when the id is absent.
    async fn delete_event(&self, id: &str) -> TerminResult<()> {
        let mut events = self.load_all()?;
        events.retain(|e| e.id != id);
        self.save_all(&events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn make_store(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::new(dir.path().join(STORE_FILE))
    }

    fn make_draft(title: &str, start: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            description: Some("Daily".to_string()),
            start_date: DateTime::parse_from_rfc3339(start).unwrap(),
            end_date: DateTime::parse_from_rfc3339(start).unwrap(),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_insert_then_list_contains_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let created = store
            .insert_event(make_draft("Standup", "2024-01-15T09:00:00Z"))
            .await
            .unwrap();

        let events = store.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, created.id);
        assert_eq!(events[0].title, "Standup");
        assert_eq!(events[0].description.as_deref(), Some("Daily"));
        assert!(!created.id.is_empty());
    }

    #[tokio::test]
    async fn test_inserts_generate_unique_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let a = store
            .insert_event(make_draft("A", "2024-01-15T09:00:00Z"))
            .await
            .unwrap();
        let b = store
            .insert_event(make_draft("B", "2024-01-15T09:00:00Z"))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        // Later start date inserted first
        store
            .insert_event(make_draft("Later", "2024-03-01T09:00:00Z"))
            .await
            .unwrap();
        store
            .insert_event(make_draft("Earlier", "2024-01-01T09:00:00Z"))
            .await
            .unwrap();

        let events = store.list_events().await.unwrap();
        assert_eq!(events[0].title, "Later");
        assert_eq!(events[1].title, "Earlier");
    }

    #[tokio::test]
    async fn test_update_replaces_all_editable_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let created = store
            .insert_event(make_draft("Standup", "2024-01-15T09:00:00Z"))
            .await
            .unwrap();

        let replacement = EventDraft {
            title: "Retro".to_string(),
            description: None,
            start_date: DateTime::parse_from_rfc3339("2024-02-01T10:00:00Z").unwrap(),
            end_date: DateTime::parse_from_rfc3339("2024-02-01T11:00:00Z").unwrap(),
            location: Some("Raum 4".to_string()),
        };
        store.update_event(&created.id, replacement).await.unwrap();

        let events = store.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, created.id);
        assert_eq!(events[0].title, "Retro");
        // No merge: the omitted description is gone
        assert_eq!(events[0].description, None);
        assert_eq!(events[0].location.as_deref(), Some("Raum 4"));
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store
            .insert_event(make_draft("Standup", "2024-01-15T09:00:00Z"))
            .await
            .unwrap();
        store
            .update_event("missing", make_draft("Retro", "2024-02-01T10:00:00Z"))
            .await
            .unwrap();

        let events = store.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Standup");
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let created = store
            .insert_event(make_draft("Standup", "2024-01-15T09:00:00Z"))
            .await
            .unwrap();
        store.delete_event(&created.id).await.unwrap();

        assert!(store.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store
            .insert_event(make_draft("Standup", "2024-01-15T09:00:00Z"))
            .await
            .unwrap();
        store.delete_event("missing").await.unwrap();

        assert_eq!(store.list_events().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_collection_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE);

        let created = LocalStore::new(path.clone())
            .insert_event(make_draft("Standup", "2024-01-15T09:00:00Z"))
            .await
            .unwrap();

        let reopened = LocalStore::new(path);
        let events = reopened.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, created.id);
    }
}
