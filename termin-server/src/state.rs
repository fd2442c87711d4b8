use std::sync::Arc;

use termin_core::config::{Config, FeedSettings};
use termin_core::session::{AuthClient, Session};
use termin_core::store::EventStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub session: Session,
    /// Identity service client; absent on the local backend, which has no
    /// accounts.
    pub auth: Option<AuthClient>,
    pub feed: FeedSettings,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn EventStore>, session: Session) -> Self {
        let auth = config
            .remote
            .as_ref()
            .map(|remote| AuthClient::new(remote, session.clone()));

        AppState {
            store,
            session,
            auth,
            feed: config.feed.clone(),
        }
    }
}
