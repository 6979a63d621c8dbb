//! Effect executor.
//!
//! Drives the reducer: `dispatch` feeds an event through [`update`], executes
//! the returned effects in order, and loops any result events back through
//! the reducer until the queue drains. Network effects run to completion
//! before the next effect starts, so a `PersistSession` always lands before
//! the fetch that follows it.
//!
//! Notice expirations are the one detached piece: they arrive later over the
//! timer channel and are dispatched by the host when it pumps
//! [`Runtime::try_timer_event`] (or awaits [`Runtime::next_timer_event`]).

use std::collections::VecDeque;

use tokio::sync::mpsc;

use taskdeck_core::api::ApiClient;
use taskdeck_core::session::SessionStore;

use crate::effects::{AppEffect, NOTICE_TTL};
use crate::events::AppEvent;
use crate::state::{AppState, Route};
use crate::update::update;

pub struct Runtime {
    client: ApiClient,
    session: SessionStore,
    timer_tx: mpsc::UnboundedSender<AppEvent>,
    timer_rx: mpsc::UnboundedReceiver<AppEvent>,
    last_redirect: Option<Route>,
}

impl Runtime {
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            client,
            session,
            timer_tx,
            timer_rx,
            last_redirect: None,
        }
    }

    /// Runs `event` and everything it triggers to quiescence.
    pub async fn dispatch(&mut self, app: &mut AppState, event: AppEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in update(app, event) {
                if let Some(next) = self.execute(effect).await {
                    queue.push_back(next);
                }
            }
        }
    }

    /// Takes the most recent redirect effect, if one fired since the last
    /// call.
    pub fn take_redirect(&mut self) -> Option<Route> {
        self.last_redirect.take()
    }

    /// Waits for the next scheduled timer event (notice expiry).
    pub async fn next_timer_event(&mut self) -> Option<AppEvent> {
        self.timer_rx.recv().await
    }

    /// Returns a timer event if one has already fired.
    pub fn try_timer_event(&mut self) -> Option<AppEvent> {
        self.timer_rx.try_recv().ok()
    }

    async fn execute(&mut self, effect: AppEffect) -> Option<AppEvent> {
        match effect {
            AppEffect::FetchTasks(query) => {
                Some(AppEvent::TasksFetched(self.client.list_tasks(&query).await))
            }
            AppEffect::SaveTask { id, draft } => {
                let result = match id {
                    Some(id) => self.client.update_task(&id, &draft).await,
                    None => self.client.create_task(&draft).await,
                };
                Some(AppEvent::TaskSaved(result))
            }
            AppEffect::DeleteTask(id) => {
                Some(AppEvent::TaskDeleted(self.client.delete_task(&id).await))
            }
            AppEffect::SubmitLogin { email, password } => Some(AppEvent::LoginCompleted(
                self.client.login(&email, &password).await,
            )),
            AppEffect::SubmitRegister {
                name,
                email,
                password,
            } => Some(AppEvent::RegisterCompleted(
                self.client.register(&name, &email, &password).await,
            )),
            AppEffect::PersistSession { user, token } => {
                if let Err(err) = self.session.login(user, token) {
                    tracing::error!(error = %err, "failed to persist session");
                }
                None
            }
            AppEffect::ClearSession => {
                if let Err(err) = self.session.logout() {
                    tracing::warn!(error = %err, "failed to clear persisted session");
                }
                None
            }
            AppEffect::Redirect(route) => {
                self.last_redirect = Some(route);
                None
            }
            AppEffect::ScheduleNoticeExpiry { seq } => {
                let tx = self.timer_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(NOTICE_TTL).await;
                    let _ = tx.send(AppEvent::NoticeExpired { seq });
                });
                None
            }
        }
    }
}
