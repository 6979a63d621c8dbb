//! Command handlers.

use taskdeck_app::events::AppEvent;
use taskdeck_app::runtime::Runtime;
use taskdeck_app::state::{AppState, NoticeKind};
use taskdeck_core::api::ApiClient;
use taskdeck_core::session::SessionStore;

pub mod auth;
pub mod config;
pub mod tasks;

/// Builds the reducer runtime and resolves the session into fresh state.
async fn boot(client: ApiClient, session: SessionStore) -> (Runtime, AppState) {
    let status = session.status();
    let mut runtime = Runtime::new(client, session);
    let mut app = AppState::new();
    runtime
        .dispatch(&mut app, AppEvent::SessionResolved(status))
        .await;
    (runtime, app)
}

/// Fails with the current error notice, if one is showing.
fn check_notice(app: &AppState) -> anyhow::Result<()> {
    if let Some(notice) = &app.dashboard.notice {
        if notice.kind == NoticeKind::Error {
            anyhow::bail!("{}", notice.text);
        }
    }
    Ok(())
}
