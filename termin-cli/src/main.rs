mod commands;
mod input;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use termin_core::config::Config;
use termin_core::session::Session;

#[derive(Parser)]
#[command(name = "termin")]
#[command(about = "Manage calendar events and publish them as an RSS feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all events, earliest first
    List,
    /// Create a new event
    New {
        title: Option<String>,

        /// Start date/time (e.g., "2025-03-20T15:00")
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,
    },
    /// Edit an existing event (whole-record replacement)
    Edit {
        id: String,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Sign in to the remote backend
    Login,
    /// Sign out and clear the stored session
    Logout,
    /// Print the public feed URL
    FeedUrl {
        /// Open the feed in the browser
        #[arg(long)]
        open: bool,
    },
    /// Render the feed XML locally
    Feed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let session = Session::load_persisted();

    match cli.command {
        Commands::List => commands::list::run(&config, session).await,
        Commands::New {
            title,
            start,
            end,
            description,
            location,
        } => commands::new::run(&config, session, title, start, end, description, location).await,
        Commands::Edit { id } => commands::edit::run(&config, session, &id).await,
        Commands::Delete { id, yes } => commands::delete::run(&config, session, &id, yes).await,
        Commands::Login => commands::login::run(&config, session).await,
        Commands::Logout => commands::logout::run(&config, session).await,
        Commands::FeedUrl { open } => commands::feed::run_url(&config, open),
        Commands::Feed => commands::feed::run_preview(&config, session).await,
    }
}
