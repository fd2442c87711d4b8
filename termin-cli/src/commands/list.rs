use anyhow::Result;
use owo_colors::OwoColorize;

use termin_core::config::Config;
use termin_core::event::sort_by_start;
use termin_core::session::Session;
use termin_core::store;

use crate::render::Render;

pub async fn run(config: &Config, session: Session) -> Result<()> {
    let store = store::open_store(config, session)?;

    let mut events = store.list_events().await?;
    sort_by_start(&mut events);

    if events.is_empty() {
        println!("{}", "No events.".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}
