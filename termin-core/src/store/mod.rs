//! Event storage.
//!
//! One interface, two independent backends: a JSON-file mirror store and a
//! client for the hosted relational backend. They are never reconciled;
//! which one is used is decided by configuration, and switching does not
//! migrate data.

mod local;
mod remote;

pub use local::LocalStore;
pub use remote::{EventRow, RemoteStore};

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Backend, Config};
use crate::error::{TerminError, TerminResult};
use crate::event::{Event, EventDraft};
use crate::session::Session;

/// Storage interface shared by both backends.
///
/// Updates are whole-record replacements of the five editable fields, never
/// merges. Failures are terminal for the operation; there are no retries.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list_events(&self) -> TerminResult<Vec<Event>>;
    async fn insert_event(&self, draft: EventDraft) -> TerminResult<Event>;
    async fn update_event(&self, id: &str, draft: EventDraft) -> TerminResult<()>;
    async fn delete_event(&self, id: &str) -> TerminResult<()>;
}

/// Open the store selected by the configuration.
pub fn open_store(config: &Config, session: Session) -> TerminResult<Arc<dyn EventStore>> {
    match config.backend {
        Backend::Local => Ok(Arc::new(LocalStore::new(LocalStore::default_path()?))),
        Backend::Remote => {
            let remote = config.remote.as_ref().ok_or_else(|| {
                TerminError::Config("backend is \"remote\" but the [remote] section is missing".into())
            })?;
            Ok(Arc::new(RemoteStore::new(remote, session)))
        }
    }
}
