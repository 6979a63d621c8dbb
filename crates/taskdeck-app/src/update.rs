//! The reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects; the reducer itself performs no I/O.
//!
//! Error absorption: every `ApiError` reaching the reducer becomes either a
//! session teardown (`Auth`) or a notice string. A 401 never surfaces as a
//! validation message.

use taskdeck_core::api::ApiError;
use taskdeck_core::session::SessionStatus;

use crate::effects::AppEffect;
use crate::events::AppEvent;
use crate::form::FormState;
use crate::guard::{self, GuardDecision};
use crate::state::{AppState, NoticeKind, Route};

const FETCH_FAILED: &str = "Failed to fetch tasks. Please try again.";
const SAVE_FAILED: &str = "Failed to save task. Please try again.";
const DELETE_FAILED: &str = "Failed to delete task. Please try again.";
const CONNECT_HINT: &str =
    "Cannot connect to the server. Please make sure your backend is running.";
const LOGIN_FAILED: &str = "Login failed. Please try again.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const TASK_CREATED: &str = "Task created successfully!";
const TASK_UPDATED: &str = "Task updated successfully!";
const TASK_DELETED: &str = "Task deleted successfully!";

/// Applies `event` to `app` and returns the effects to execute.
pub fn update(app: &mut AppState, event: AppEvent) -> Vec<AppEffect> {
    match event {
        AppEvent::SessionResolved(status) => {
            app.session = status;
            if status != SessionStatus::Authenticated {
                app.user = None;
            }
            vec![]
        }
        AppEvent::DashboardVisited => {
            app.route = Route::Dashboard;
            match guard::decide(app.session) {
                GuardDecision::Render => {
                    app.dashboard.loading = true;
                    vec![AppEffect::FetchTasks(app.dashboard.query())]
                }
                GuardDecision::RedirectToLogin => {
                    app.route = Route::Login;
                    vec![AppEffect::Redirect(Route::Login)]
                }
                GuardDecision::Loading => vec![],
            }
        }

        AppEvent::FilterChanged(filter) => {
            app.dashboard.filter = filter;
            app.dashboard.loading = true;
            vec![AppEffect::FetchTasks(app.dashboard.query())]
        }
        AppEvent::SearchChanged(search) => {
            app.dashboard.search = search;
            app.dashboard.loading = true;
            vec![AppEffect::FetchTasks(app.dashboard.query())]
        }
        AppEvent::TasksFetched(Ok(tasks)) => {
            app.dashboard.loading = false;
            app.dashboard.tasks = tasks;
            // A fresh list clears a stale error, but a success banner from
            // the save that triggered this refetch stays up until it expires.
            if matches!(&app.dashboard.notice, Some(n) if n.kind == NoticeKind::Error) {
                app.dashboard.notice = None;
            }
            vec![]
        }
        AppEvent::TasksFetched(Err(err)) => {
            app.dashboard.loading = false;
            fail(app, &err, FETCH_FAILED)
        }

        AppEvent::CreateRequested => {
            app.dashboard.form = FormState::open_blank();
            vec![]
        }
        AppEvent::EditRequested(id) => {
            match app.dashboard.task(&id) {
                Some(task) => app.dashboard.form = FormState::open_for(task),
                None => {
                    app.dashboard
                        .push_notice(NoticeKind::Error, format!("Task not found: {id}"));
                }
            }
            vec![]
        }
        AppEvent::DraftChanged(draft) => {
            app.dashboard.form.set_draft(draft);
            vec![]
        }
        AppEvent::FormCancelled => {
            app.dashboard.form = FormState::Closed;
            vec![]
        }
        AppEvent::FormSubmitted => {
            let Some((id, draft)) = app.dashboard.form.submit_target() else {
                return vec![];
            };
            if let Err(message) = draft.validate() {
                app.dashboard.push_notice(NoticeKind::Error, message);
                return vec![];
            }
            vec![AppEffect::SaveTask { id, draft }]
        }
        AppEvent::TaskSaved(Ok(task)) => {
            tracing::debug!(id = %task.id, "task saved");
            let text = if app.dashboard.form.is_editing() {
                TASK_UPDATED
            } else {
                TASK_CREATED
            };
            app.dashboard.form = FormState::Closed;
            let seq = app.dashboard.push_notice(NoticeKind::Success, text);
            app.dashboard.loading = true;
            vec![
                AppEffect::ScheduleNoticeExpiry { seq },
                AppEffect::FetchTasks(app.dashboard.query()),
            ]
        }
        // The form stays open so the draft can be corrected.
        AppEvent::TaskSaved(Err(err)) => fail(app, &err, SAVE_FAILED),

        AppEvent::DeleteRequested(id) => {
            app.dashboard.pending_delete = Some(id);
            vec![]
        }
        AppEvent::DeleteConfirmed => match app.dashboard.pending_delete.take() {
            Some(id) => vec![AppEffect::DeleteTask(id)],
            None => vec![],
        },
        AppEvent::DeleteDeclined => {
            app.dashboard.pending_delete = None;
            vec![]
        }
        AppEvent::TaskDeleted(Ok(())) => {
            let seq = app.dashboard.push_notice(NoticeKind::Success, TASK_DELETED);
            app.dashboard.loading = true;
            vec![
                AppEffect::ScheduleNoticeExpiry { seq },
                AppEffect::FetchTasks(app.dashboard.query()),
            ]
        }
        AppEvent::TaskDeleted(Err(err)) => fail(app, &err, DELETE_FAILED),

        AppEvent::NoticeExpired { seq } => {
            if matches!(&app.dashboard.notice, Some(n) if n.seq == seq) {
                app.dashboard.notice = None;
            }
            vec![]
        }

        AppEvent::LoginSubmitted { email, password } => {
            app.auth_error = None;
            vec![AppEffect::SubmitLogin { email, password }]
        }
        AppEvent::LoginCompleted(result) => auth_completed(app, result, LOGIN_FAILED),
        AppEvent::RegisterSubmitted {
            name,
            email,
            password,
        } => {
            app.auth_error = None;
            vec![AppEffect::SubmitRegister {
                name,
                email,
                password,
            }]
        }
        AppEvent::RegisterCompleted(result) => auth_completed(app, result, REGISTER_FAILED),
        AppEvent::LogoutRequested => {
            app.session = SessionStatus::Anonymous;
            app.user = None;
            app.route = Route::Login;
            vec![AppEffect::ClearSession, AppEffect::Redirect(Route::Login)]
        }
    }
}

/// Shared tail of login and register: both yield a token plus user.
fn auth_completed(
    app: &mut AppState,
    result: taskdeck_core::api::ApiResult<taskdeck_core::api::AuthResponse>,
    fallback: &str,
) -> Vec<AppEffect> {
    match result {
        Ok(auth) => {
            app.session = SessionStatus::Authenticated;
            app.user = Some(auth.user.clone());
            app.auth_error = None;
            app.route = Route::Dashboard;
            app.dashboard.loading = true;
            // Persist first so the fetch carries the new token.
            vec![
                AppEffect::PersistSession {
                    user: auth.user,
                    token: auth.token,
                },
                AppEffect::FetchTasks(app.dashboard.query()),
            ]
        }
        Err(err) => {
            app.auth_error = Some(match &err {
                ApiError::Network(_) => CONNECT_HINT.to_string(),
                _ => err
                    .server_message()
                    .map_or_else(|| fallback.to_string(), str::to_string),
            });
            vec![]
        }
    }
}

/// Absorbs a task-operation failure: 401 tears the session down, everything
/// else becomes an error notice. The cache is never touched.
fn fail(app: &mut AppState, err: &ApiError, fallback: &str) -> Vec<AppEffect> {
    if err.is_auth() {
        tracing::warn!("authentication rejected, clearing session");
        app.session = SessionStatus::Anonymous;
        app.user = None;
        app.route = Route::Login;
        return vec![AppEffect::ClearSession, AppEffect::Redirect(Route::Login)];
    }

    let text = match err {
        ApiError::Network(_) => CONNECT_HINT.to_string(),
        _ => err
            .first_validation_message()
            .map_or_else(|| fallback.to_string(), str::to_string),
    };
    app.dashboard.push_notice(NoticeKind::Error, text);
    vec![]
}
