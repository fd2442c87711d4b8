//! Remote store client.
//!
//! Talks to the hosted relational backend's REST layer (PostgREST-style):
//! the `events` table is exposed at `/rest/v1/events` and returns rows in
//! the snake_case shape below. Row-level ownership is enforced entirely by
//! the backend; this client only gates mutations on the presence of a
//! signed-in identity.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{TerminError, TerminResult};
use crate::event::{Event, EventDraft, sort_by_start};
use crate::session::{Identity, Session};
use crate::store::EventStore;

/// A row of the remote `events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub location: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            location: row.location,
            user_id: Some(row.user_id),
            created_at: row.created_at,
        }
    }
}

impl From<Event> for EventRow {
    fn from(event: Event) -> Self {
        EventRow {
            id: event.id,
            title: event.title,
            description: event.description,
            start_date: event.start_date,
            end_date: event.end_date,
            location: event.location,
            user_id: event.user_id.unwrap_or_default(),
            created_at: event.created_at,
        }
    }
}

/// Insert payload: the five editable fields plus the owner. The backend
/// generates id and created_at.
#[derive(Debug, Serialize)]
struct NewEventRow {
    title: String,
    description: Option<String>,
    start_date: DateTime<FixedOffset>,
    end_date: DateTime<FixedOffset>,
    location: Option<String>,
    user_id: String,
}

/// Update payload: whole-record replacement of the five editable fields.
/// Absent optionals serialize as explicit nulls so a cleared field clears
/// the column instead of being merged away.
#[derive(Debug, Serialize)]
struct EventPatch {
    title: String,
    description: Option<String>,
    start_date: DateTime<FixedOffset>,
    end_date: DateTime<FixedOffset>,
    location: Option<String>,
}

impl From<EventDraft> for EventPatch {
    fn from(draft: EventDraft) -> Self {
        EventPatch {
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            location: draft.location,
        }
    }
}

/// Client for the hosted backend's `events` table.
pub struct RemoteStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    session: Session,
}

impl RemoteStore {
    pub fn new(remote: &RemoteConfig, session: Session) -> Self {
        RemoteStore {
            http: reqwest::Client::new(),
            base_url: remote.url.trim_end_matches('/').to_string(),
            api_key: remote.anon_key.clone(),
            session,
        }
    }

    fn events_url(&self) -> String {
        format!("{}/rest/v1/events", self.base_url)
    }

    /// The bearer token for a request: the user's access token when signed
    /// in, the anon key otherwise.
    fn bearer(&self) -> String {
        self.session
            .current_user()
            .map(|identity| identity.access_token)
            .unwrap_or_else(|| self.api_key.clone())
    }

    /// Mutations require an identity; reads do not.
    fn require_identity(&self) -> TerminResult<Identity> {
        self.session.current_user().ok_or(TerminError::Auth)
    }

    async fn check(response: reqwest::Response) -> TerminResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TerminError::Store(format!("{status}: {body}")))
    }
}

#[async_trait]
impl EventStore for RemoteStore {
    /// Events sorted ascending by start date; the backend orders the query
    /// and the ordering is re-asserted here.
    async fn list_events(&self) -> TerminResult<Vec<Event>> {
        debug!("listing events from {}", self.events_url());

        let response = self
            .http
            .get(self.events_url())
            .query(&[("select", "*"), ("order", "start_date.asc")])
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer())
            .send()
            .await
            .map_err(|e| TerminError::Store(e.to_string()))?;

        let rows: Vec<EventRow> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| TerminError::Store(e.to_string()))?;

        let mut events: Vec<Event> = rows.into_iter().map(Event::from).collect();
        sort_by_start(&mut events);
        Ok(events)
    }

    async fn insert_event(&self, draft: EventDraft) -> TerminResult<Event> {
        let identity = self.require_identity()?;

        let row = NewEventRow {
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            location: draft.location,
            user_id: identity.user_id,
        };

        let response = self
            .http
            .post(self.events_url())
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&identity.access_token)
            .json(&row)
            .send()
            .await
            .map_err(|e| TerminError::Store(e.to_string()))?;

        let mut rows: Vec<EventRow> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| TerminError::Store(e.to_string()))?;

        if rows.is_empty() {
            return Err(TerminError::Store("insert returned no row".into()));
        }

        Ok(rows.remove(0).into())
    }

    async fn update_event(&self, id: &str, draft: EventDraft) -> TerminResult<()> {
        let identity = self.require_identity()?;

        let response = self
            .http
            .patch(self.events_url())
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.api_key)
            .bearer_auth(&identity.access_token)
            .json(&EventPatch::from(draft))
            .send()
            .await
            .map_err(|e| TerminError::Store(e.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }

    async fn delete_event(&self, id: &str) -> TerminResult<()> {
        let identity = self.require_identity()?;

        let response = self
            .http
            .delete(self.events_url())
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.api_key)
            .bearer_auth(&identity.access_token)
            .send()
            .await
            .map_err(|e| TerminError::Store(e.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }
}
