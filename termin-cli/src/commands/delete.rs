use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use termin_core::config::Config;
use termin_core::session::Session;
use termin_core::store;

pub async fn run(config: &Config, session: Session, id: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("  Really delete this event?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "  Aborted.".dimmed());
            return Ok(());
        }
    }

    let store = store::open_store(config, session)?;
    store.delete_event(id).await?;

    println!("{}", "  Deleted.".green());
    Ok(())
}
