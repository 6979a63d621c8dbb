//! Events consumed by the reducer.

use taskdeck_core::api::{ApiResult, AuthResponse};
use taskdeck_core::session::SessionStatus;
use taskdeck_core::tasks::{StatusFilter, Task, TaskDraft};

/// Everything that can happen to the application.
///
/// `*Completed` / `*Fetched` / `*Saved` / `*Deleted` variants carry the
/// result of an effect the runtime executed.
#[derive(Debug)]
pub enum AppEvent {
    /// The persisted session was resolved at startup.
    SessionResolved(SessionStatus),
    /// The user navigated to the dashboard.
    DashboardVisited,

    FilterChanged(StatusFilter),
    SearchChanged(String),
    TasksFetched(ApiResult<Vec<Task>>),

    /// Open a blank create form.
    CreateRequested,
    /// Open an edit form for a cached task.
    EditRequested(String),
    DraftChanged(TaskDraft),
    FormCancelled,
    FormSubmitted,
    TaskSaved(ApiResult<Task>),

    /// Arms the delete confirmation gate. No network call yet.
    DeleteRequested(String),
    DeleteConfirmed,
    DeleteDeclined,
    TaskDeleted(ApiResult<()>),

    /// A scheduled notice expiration fired. Ignored when stale.
    NoticeExpired { seq: u64 },

    LoginSubmitted { email: String, password: String },
    LoginCompleted(ApiResult<AuthResponse>),
    RegisterSubmitted {
        name: String,
        email: String,
        password: String,
    },
    RegisterCompleted(ApiResult<AuthResponse>),
    LogoutRequested,
}
