use anyhow::{Context, Result};

use termin_core::config::Config;
use termin_core::event::sort_by_start;
use termin_core::feed::{FeedChannel, serialize_feed};
use termin_core::session::Session;
use termin_core::store;

/// Print the public feed URL, the address feed readers subscribe to.
pub fn run_url(config: &Config, open: bool) -> Result<()> {
    let url = config.feed_url();
    println!("{url}");

    if open {
        open::that(&url).with_context(|| format!("Failed to open {url}"))?;
    }

    Ok(())
}

/// Render the feed XML locally, as the server would serve it.
pub async fn run_preview(config: &Config, session: Session) -> Result<()> {
    let store = store::open_store(config, session)?;

    let mut events = store.list_events().await?;
    sort_by_start(&mut events);

    let channel = FeedChannel {
        title: config.feed.title.clone(),
        link: config
            .feed
            .public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", config.server.port)),
        description: config.feed.description.clone(),
    };

    print!("{}", serialize_feed(&events, &channel));
    Ok(())
}
