//! Effects returned by the reducer for the runtime to execute.
//!
//! Effects represent I/O only; the reducer never performs any itself.
//! Each network effect reports back as exactly one result event.

use std::time::Duration;

use taskdeck_core::session::UserRecord;
use taskdeck_core::tasks::{TaskDraft, TaskQuery};

use crate::state::Route;

/// How long a success notice stays up before it is cleared.
pub const NOTICE_TTL: Duration = Duration::from_millis(3000);

/// Commands for the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEffect {
    /// GET the task list for `query`; reports `TasksFetched`.
    FetchTasks(TaskQuery),
    /// Create (`id` is `None`) or update a task; reports `TaskSaved`.
    SaveTask {
        id: Option<String>,
        draft: TaskDraft,
    },
    /// Delete a task; reports `TaskDeleted`.
    DeleteTask(String),
    /// Exchange credentials for a session; reports `LoginCompleted`.
    SubmitLogin { email: String, password: String },
    /// Create an account; reports `RegisterCompleted`.
    SubmitRegister {
        name: String,
        email: String,
        password: String,
    },
    /// Write the session to disk so later requests carry the token.
    PersistSession { user: UserRecord, token: String },
    /// Remove the persisted session.
    ClearSession,
    /// Navigation the host should perform.
    Redirect(Route),
    /// Fire `NoticeExpired { seq }` after [`NOTICE_TTL`].
    ScheduleNoticeExpiry { seq: u64 },
}
