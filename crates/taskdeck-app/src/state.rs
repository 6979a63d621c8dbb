//! Application state.
//!
//! One tree, mutated only by the reducer. The dashboard slice owns the task
//! cache; the cache is replaced wholesale on every successful fetch and is
//! never patched in place.

use taskdeck_core::session::{SessionStatus, UserRecord};
use taskdeck_core::tasks::{StatusFilter, Task, TaskQuery};

use crate::form::FormState;

/// Logical screen the user is on. Routing mechanics beyond the guard
/// decision live outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

/// Kind of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient success/error banner.
///
/// Success and error notices are mutually exclusive; the sequence number
/// lets scheduled expirations detect that they are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub seq: u64,
}

/// Dashboard slice: task cache, filter/search, form, and notices.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub filter: StatusFilter,
    pub search: String,
    pub notice: Option<Notice>,
    pub next_notice_seq: u64,
    /// Armed delete confirmation; no network call until confirmed.
    pub pending_delete: Option<String>,
    pub form: FormState,
}

impl DashboardState {
    /// Server query for the current filter and search term.
    pub fn query(&self) -> TaskQuery {
        TaskQuery {
            status: self.filter,
            search: self.search.clone(),
        }
    }

    /// Looks up a cached task by canonical id.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Installs a notice, returning its sequence number.
    pub fn push_notice(&mut self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        self.next_notice_seq += 1;
        let seq = self.next_notice_seq;
        self.notice = Some(Notice {
            kind,
            text: text.into(),
            seq,
        });
        seq
    }
}

/// The full application state.
#[derive(Debug)]
pub struct AppState {
    pub session: SessionStatus,
    pub user: Option<UserRecord>,
    pub route: Route,
    /// Error shown on the login/register screen; never a notice.
    pub auth_error: Option<String>,
    pub dashboard: DashboardState,
}

impl AppState {
    /// Fresh state at process start. The session is unresolved and the
    /// user lands on the dashboard, where the guard takes over.
    pub fn new() -> Self {
        Self {
            session: SessionStatus::Unknown,
            user: None,
            route: Route::Dashboard,
            auth_error: None,
            dashboard: DashboardState::default(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
