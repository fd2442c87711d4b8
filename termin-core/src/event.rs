//! Calendar event types.
//!
//! `Event` is the canonical record both stores and the feed serializer agree
//! on. On the wire it uses the camelCase shape expected by UI frontends and
//! the local mirror store; the remote store's snake_case row shape lives in
//! `store::remote` and converts losslessly to and from this type.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{TerminError, TerminResult};

/// A calendar event.
///
/// Timestamps keep the offset they were written with so that downstream
/// formatting (the feed's compact iCal stamps) can reuse the source
/// wall-clock value verbatim instead of normalizing to UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Owner of the row on the remote store. The local mirror store has no
    /// ownership concept and leaves this absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Set by the remote store on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,
}

/// The five editable fields of an event, used for insert and for
/// whole-record update (no field-level merge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub location: Option<String>,
}

impl EventDraft {
    /// Validate the draft at the submission boundary.
    ///
    /// Only the title is checked here; timestamps are already parsed and an
    /// end before the start is a form-level hint, not a stored invariant.
    pub fn validate(&self) -> TerminResult<()> {
        if self.title.trim().is_empty() {
            return Err(TerminError::Validation("title must not be empty".into()));
        }
        Ok(())
    }

    /// Whether the draft's end lies before its start. Forms use this to
    /// re-prompt; stores accept such drafts unchanged.
    pub fn ends_before_start(&self) -> bool {
        self.end_date < self.start_date
    }
}

impl Event {
    /// Apply a draft to an existing event, replacing all five editable
    /// fields and keeping id, owner and creation timestamp.
    pub fn apply(&mut self, draft: EventDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.location = draft.location;
    }
}

/// Sort events ascending by start date, the ordering used for display and
/// feed generation.
pub fn sort_by_start(events: &mut [Event]) {
    events.sort_by_key(|e| e.start_date);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_draft(start: &str, end: &str) -> EventDraft {
        EventDraft {
            title: "Standup".to_string(),
            description: None,
            start_date: DateTime::parse_from_rfc3339(start).unwrap(),
            end_date: DateTime::parse_from_rfc3339(end).unwrap(),
            location: None,
        }
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut draft = make_draft("2024-01-15T09:00:00Z", "2024-01-15T09:15:00Z");
        draft.title = String::new();
        assert!(draft.validate().is_err());

        draft.title = "   ".to_string();
        assert!(draft.validate().is_err());

        draft.title = "Standup".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_ends_before_start_is_advisory() {
        let draft = make_draft("2024-01-15T10:00:00Z", "2024-01-15T09:00:00Z");
        assert!(draft.ends_before_start());
        // Still a valid draft as far as the stores are concerned
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let event = Event {
            id: "1".to_string(),
            title: "Standup".to_string(),
            description: None,
            start_date: DateTime::parse_from_rfc3339("2024-01-15T09:00:00Z").unwrap(),
            end_date: DateTime::parse_from_rfc3339("2024-01-15T09:15:00Z").unwrap(),
            location: None,
            user_id: None,
            created_at: None,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("startDate").is_some());
        assert!(json.get("endDate").is_some());
        // Absent optionals are omitted, matching the local store's records
        assert!(json.get("description").is_none());
        assert!(json.get("userId").is_none());
    }

    #[test]
    fn test_apply_replaces_all_editable_fields() {
        let mut event = Event {
            id: "1".to_string(),
            title: "Standup".to_string(),
            description: Some("Daily".to_string()),
            start_date: DateTime::parse_from_rfc3339("2024-01-15T09:00:00Z").unwrap(),
            end_date: DateTime::parse_from_rfc3339("2024-01-15T09:15:00Z").unwrap(),
            location: Some("Office".to_string()),
            user_id: Some("u1".to_string()),
            created_at: None,
        };

        event.apply(make_draft("2024-02-01T10:00:00Z", "2024-02-01T11:00:00Z"));

        assert_eq!(event.id, "1");
        assert_eq!(event.user_id.as_deref(), Some("u1"));
        // Omitted optionals are cleared, not merged
        assert_eq!(event.description, None);
        assert_eq!(event.location, None);
    }

    #[test]
    fn test_sort_by_start_orders_ascending() {
        let a = Event {
            id: "a".to_string(),
            title: "Later".to_string(),
            description: None,
            start_date: DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z").unwrap(),
            end_date: DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z").unwrap(),
            location: None,
            user_id: None,
            created_at: None,
        };
        let mut b = a.clone();
        b.id = "b".to_string();
        b.title = "Earlier".to_string();
        b.start_date = DateTime::parse_from_rfc3339("2024-01-01T09:00:00Z").unwrap();

        let mut events = vec![a, b];
        sort_by_start(&mut events);

        assert_eq!(events[0].id, "b");
        assert_eq!(events[1].id, "a");
    }
}
