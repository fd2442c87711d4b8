use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;

use termin_core::config::{Backend, Config};
use termin_core::error::TerminError;
use termin_core::session::{AuthClient, Session};

pub async fn run(config: &Config, session: Session) -> Result<()> {
    if config.backend == Backend::Local {
        println!("{}", "The local backend does not use an account.".dimmed());
        return Ok(());
    }

    let remote = config
        .remote
        .as_ref()
        .ok_or_else(|| TerminError::Config("backend is \"remote\" but the [remote] section is missing".into()))?;

    let email: String = Input::new().with_prompt("  Email").interact_text()?;
    let password = rpassword::prompt_password("  Password: ")?;

    let auth = AuthClient::new(remote, session.clone());
    let identity = auth.sign_in(&email, &password).await?;
    session.persist()?;

    println!("{}", format!("  Signed in as {}", identity.email).green());
    Ok(())
}
