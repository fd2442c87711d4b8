//! Terminal rendering for termin types.

use owo_colors::OwoColorize;
use termin_core::event::Event;

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let span = format!(
            "{} -> {}",
            self.start_date.naive_local().format("%Y-%m-%d %H:%M"),
            self.end_date.naive_local().format("%H:%M")
        );

        let mut line = format!(
            "  {}  {}  {}",
            span.cyan(),
            self.title.bold(),
            format!("({})", self.id).dimmed()
        );

        if let Some(location) = &self.location {
            line.push_str(&format!("\n      {}", location.dimmed()));
        }
        if let Some(description) = &self.description {
            line.push_str(&format!("\n      {}", description.dimmed()));
        }

        line
    }
}
