use anyhow::Result;
use owo_colors::OwoColorize;

use termin_core::config::{Backend, Config};
use termin_core::session::{AuthClient, Session};

pub async fn run(config: &Config, session: Session) -> Result<()> {
    if config.backend == Backend::Local {
        println!("{}", "The local backend does not use an account.".dimmed());
        return Ok(());
    }

    if session.current_user().is_none() {
        println!("{}", "Not signed in.".dimmed());
        return Ok(());
    }

    // Best-effort token revocation; the session is cleared regardless
    if let Some(remote) = config.remote.as_ref() {
        AuthClient::new(remote, session.clone()).sign_out().await?;
    } else {
        session.set(None);
    }
    session.persist()?;

    println!("{}", "Signed out.".green());
    Ok(())
}
