//! Global termin configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{TerminError, TerminResult};

const DEFAULT_PORT: u16 = 4280;

/// Global configuration at ~/.config/termin/config.toml
///
/// Selects which event store backend to use and carries the feed channel
/// metadata. A missing file means pure defaults (local backend).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,

    /// Remote store settings, required when `backend = "remote"`.
    pub remote: Option<RemoteConfig>,

    #[serde(default)]
    pub feed: FeedSettings,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Which event store implementation to use. The two backends are
/// independent; switching does not migrate data between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Local,
    Remote,
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Project base URL, e.g. "https://abc.supabase.co"
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
}

/// Feed channel metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "default_feed_title")]
    pub title: String,
    #[serde(default = "default_feed_description")]
    pub description: String,
    /// Public base address of the deployment, used by the CLI's feed URL
    /// affordance. The server derives its own link from the request instead.
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_feed_title() -> String {
    "RSS Kalender".to_string()
}

fn default_feed_description() -> String {
    "Kalendereinträge als RSS Feed".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for FeedSettings {
    fn default() -> Self {
        FeedSettings {
            title: default_feed_title(),
            description: default_feed_description(),
            public_url: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { port: DEFAULT_PORT }
    }
}

impl Config {
    pub fn config_path() -> TerminResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TerminError::Config("Could not determine config directory".into()))?
            .join("termin");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when no file exists.
    pub fn load() -> TerminResult<Config> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| TerminError::Config(format!("{}: {}", path.display(), e)))
    }

    /// The public feed URL, from the configured deployment address or the
    /// local server as a fallback.
    pub fn feed_url(&self) -> String {
        match &self.feed.public_url {
            Some(base) => format!("{}/api/feed.rss", base.trim_end_matches('/')),
            None => format!("http://localhost:{}/api/feed.rss", self.server.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_local_backend() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend, Backend::Local);
        assert_eq!(config.feed.title, "RSS Kalender");
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_remote_backend() {
        let config: Config = toml::from_str(
            r#"
            backend = "remote"

            [remote]
            url = "https://abc.supabase.co"
            anon_key = "key"

            [feed]
            title = "Team"
            public_url = "https://kalender.example.org/"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend, Backend::Remote);
        assert_eq!(config.remote.as_ref().unwrap().url, "https://abc.supabase.co");
        assert_eq!(config.feed.title, "Team");
        // Default survives partial [feed] tables
        assert_eq!(config.feed.description, "Kalendereinträge als RSS Feed");
        assert_eq!(config.feed_url(), "https://kalender.example.org/api/feed.rss");
    }
}
