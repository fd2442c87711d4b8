use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use dialoguer::Input;
use owo_colors::OwoColorize;

use termin_core::config::Config;
use termin_core::event::EventDraft;
use termin_core::session::Session;
use termin_core::store;

use crate::input::parse_datetime;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    config: &Config,
    session: Session,
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
    description: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let interactive = title.is_none() || start.is_none() || end.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Start ---
    let start_date = match start {
        Some(s) => parse_datetime(&s)?,
        None => prompt_with_retry("  Start (e.g. 2025-03-20T15:00)")?,
    };

    // --- End: re-prompt while it lies before the start ---
    let end_date = match end {
        Some(e) => {
            let end_date = parse_datetime(&e)?;
            if end_date < start_date {
                anyhow::bail!("End must not be before the start");
            }
            end_date
        }
        None => loop {
            let candidate = prompt_with_retry("  End")?;
            if candidate >= start_date {
                break candidate;
            }
            eprintln!("  {}", "End must not be before the start".red());
        },
    };

    // --- Description / Location ---
    let description = optional_field(description, interactive, "  Description (skip)")?;
    let location = optional_field(location, interactive, "  Where? (skip)")?;

    let draft = EventDraft {
        title,
        description,
        start_date,
        end_date,
        location,
    };
    draft.validate()?;

    let store = store::open_store(config, session)?;
    let event = store.insert_event(draft).await?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", event.title).green());

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry(prompt: &str) -> Result<DateTime<FixedOffset>> {
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse_datetime(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// An optional text field: from the flag if given, prompted when
/// interactive, absent otherwise. Empty input means absent.
fn optional_field(
    value: Option<String>,
    interactive: bool,
    prompt: &str,
) -> Result<Option<String>> {
    let text = match value {
        Some(v) => v,
        None if interactive => Input::new()
            .with_prompt(prompt)
            .default(String::new())
            .show_default(false)
            .interact_text()?,
        None => return Ok(None),
    };

    Ok(if text.is_empty() { None } else { Some(text) })
}
