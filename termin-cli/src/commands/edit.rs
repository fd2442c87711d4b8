use anyhow::{Context, Result};
use dialoguer::Input;
use owo_colors::OwoColorize;

use termin_core::config::Config;
use termin_core::event::EventDraft;
use termin_core::session::Session;
use termin_core::store;

use crate::input::{format_datetime, parse_datetime};

/// Edit an event interactively, prompting with the current values as
/// defaults. The result replaces all five editable fields.
pub async fn run(config: &Config, session: Session, id: &str) -> Result<()> {
    let store = store::open_store(config, session)?;

    let events = store.list_events().await?;
    let event = events
        .iter()
        .find(|e| e.id == id)
        .with_context(|| format!("No event with id '{id}'"))?;

    let title: String = Input::new()
        .with_prompt("  Title")
        .default(event.title.clone())
        .interact_text()?;

    let start_date = prompt_datetime("  Start", &format_datetime(&event.start_date))?;

    let end_date = loop {
        let candidate = prompt_datetime("  End", &format_datetime(&event.end_date))?;
        if candidate >= start_date {
            break candidate;
        }
        eprintln!("  {}", "End must not be before the start".red());
    };

    let description: String = Input::new()
        .with_prompt("  Description (empty clears)")
        .default(event.description.clone().unwrap_or_default())
        .show_default(true)
        .interact_text()?;

    let location: String = Input::new()
        .with_prompt("  Where? (empty clears)")
        .default(event.location.clone().unwrap_or_default())
        .show_default(true)
        .interact_text()?;

    let draft = EventDraft {
        title,
        description: if description.is_empty() { None } else { Some(description) },
        start_date,
        end_date,
        location: if location.is_empty() { None } else { Some(location) },
    };
    draft.validate()?;

    store.update_event(id, draft).await?;

    println!("{}", "  Updated.".green());
    Ok(())
}

fn prompt_datetime(prompt: &str, default: &str) -> Result<chrono::DateTime<chrono::FixedOffset>> {
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;
        match parse_datetime(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}
