//! Session state for the remote backend's identity service.
//!
//! The current identity is process-wide mutable state. Instead of an ambient
//! lookup it is held in a watch channel: consumers read the current value or
//! subscribe to auth state changes, and the `AuthClient` publishes sign-in
//! and sign-out results into it.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{TerminError, TerminResult};

/// A signed-in user of the remote backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

/// Observable, process-wide auth session.
///
/// Cloning shares the underlying channel; the state lives as long as any
/// clone does.
#[derive(Clone)]
pub struct Session {
    tx: Arc<watch::Sender<Option<Identity>>>,
}

impl Session {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Session { tx: Arc::new(tx) }
    }

    /// The session file at ~/.config/termin/session.json, used to carry the
    /// identity across CLI invocations.
    fn session_path() -> TerminResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TerminError::Config("Could not determine config directory".into()))?
            .join("termin");

        Ok(config_dir.join("session.json"))
    }

    /// Create a session seeded from the persisted session file, if any.
    /// An unreadable or malformed file simply yields a signed-out session.
    pub fn load_persisted() -> Self {
        let session = Session::new();

        if let Ok(path) = Self::session_path()
            && let Ok(content) = std::fs::read_to_string(&path)
        {
            match serde_json::from_str::<Identity>(&content) {
                Ok(identity) => {
                    debug!("restored session for {}", identity.email);
                    session.set(Some(identity));
                }
                Err(e) => debug!("ignoring malformed session file: {e}"),
            }
        }

        session
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }

    /// Subscribe to auth state changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }

    /// Replace the current identity, notifying subscribers.
    pub fn set(&self, identity: Option<Identity>) {
        self.tx.send_replace(identity);
    }

    /// Write the current identity to the session file.
    pub fn persist(&self) -> TerminResult<()> {
        let path = Self::session_path()?;

        match self.current_user() {
            Some(identity) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let content = serde_json::to_string_pretty(&identity)
                    .map_err(|e| TerminError::Serialization(e.to_string()))?;
                std::fs::write(&path, content)?;
            }
            None => {
                if path.exists() {
                    std::fs::remove_file(&path)?;
                }
            }
        }

        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

/// Client for the backend's built-in identity service (GoTrue-style).
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    session: Session,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    email: String,
}

impl AuthClient {
    pub fn new(remote: &RemoteConfig, session: Session) -> Self {
        AuthClient {
            http: reqwest::Client::new(),
            base_url: remote.url.trim_end_matches('/').to_string(),
            api_key: remote.anon_key.clone(),
            session,
        }
    }

    /// Sign in with email and password, publishing the identity into the
    /// session on success.
    pub async fn sign_in(&self, email: &str, password: &str) -> TerminResult<Identity> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| TerminError::Store(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TerminError::Store(format!("sign-in failed: {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TerminError::Store(e.to_string()))?;

        let identity = Identity {
            user_id: token.user.id,
            email: token.user.email,
            access_token: token.access_token,
        };

        self.session.set(Some(identity.clone()));
        Ok(identity)
    }

    /// Sign out, revoking the token best-effort and clearing the session
    /// either way.
    pub async fn sign_out(&self) -> TerminResult<()> {
        if let Some(identity) = self.session.current_user() {
            let url = format!("{}/auth/v1/logout", self.base_url);

            let result = self
                .http
                .post(&url)
                .header("apikey", &self.api_key)
                .bearer_auth(&identity.access_token)
                .send()
                .await;

            if let Err(e) = result {
                debug!("logout request failed, clearing session anyway: {e}");
            }
        }

        self.session.set(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_identity() -> Identity {
        Identity {
            user_id: "u1".to_string(),
            email: "a@example.org".to_string(),
            access_token: "token".to_string(),
        }
    }

    #[test]
    fn test_session_starts_signed_out() {
        let session = Session::new();
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_set_notifies_subscribers() {
        let session = Session::new();
        let rx = session.subscribe();

        session.set(Some(make_identity()));

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow().as_ref().map(|i| i.email.as_str()), Some("a@example.org"));
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::new();
        let clone = session.clone();

        session.set(Some(make_identity()));

        assert_eq!(clone.current_user().map(|i| i.user_id), Some("u1".to_string()));
    }
}
