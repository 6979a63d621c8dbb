//! Auth command handlers.

use anyhow::{Context, Result, bail};
use taskdeck_app::events::AppEvent;
use taskdeck_core::api::ApiClient;
use taskdeck_core::session::SessionStore;

use super::boot;

pub async fn login(
    client: ApiClient,
    session: SessionStore,
    email: &str,
    password: &str,
) -> Result<()> {
    let (mut runtime, mut app) = boot(client, session).await;
    runtime
        .dispatch(
            &mut app,
            AppEvent::LoginSubmitted {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await;

    if let Some(message) = app.auth_error {
        bail!("{message}");
    }
    let user = app.user.context("login returned no user")?;
    println!("Logged in as {} <{}>", user.name, user.email);
    Ok(())
}

pub async fn register(
    client: ApiClient,
    session: SessionStore,
    name: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    let (mut runtime, mut app) = boot(client, session).await;
    runtime
        .dispatch(
            &mut app,
            AppEvent::RegisterSubmitted {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await;

    if let Some(message) = app.auth_error {
        bail!("{message}");
    }
    let user = app.user.context("registration returned no user")?;
    println!("Registered and logged in as {} <{}>", user.name, user.email);
    Ok(())
}

pub async fn logout(client: ApiClient, session: SessionStore) -> Result<()> {
    let (mut runtime, mut app) = boot(client, session).await;
    runtime.dispatch(&mut app, AppEvent::LogoutRequested).await;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(session: &SessionStore) -> Result<()> {
    match session.user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            Ok(())
        }
        None => bail!("Not logged in. Run `taskdeck login` first."),
    }
}
