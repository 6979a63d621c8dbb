//! Task data model: canonical records, drafts, and filter parameters.
//!
//! The server may populate either `id` or the legacy `_id` field on task
//! records. [`TaskRecord::normalize`] is the single ingestion boundary that
//! maps both shapes to the canonical [`Task`]; no other code inspects the
//! legacy field. Every task that enters the local cache has a non-empty
//! canonical id.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length accepted client-side.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum description length accepted client-side.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Returns the wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Returns all statuses for iteration (e.g., in pickers).
    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ]
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(format!(
                "Unknown task status: {value} (expected pending, in-progress, or completed)"
            )),
        }
    }
}

/// A task with a canonical identifier.
///
/// Only produced by [`TaskRecord::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Raw task record as returned by the server.
///
/// Carries both accepted identifier fields; nothing outside this module
/// should deserialize task payloads directly.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "_id", default)]
    pub legacy_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Maps a server record to the canonical [`Task`].
    ///
    /// `id` takes precedence over the legacy `_id`; blank identifiers are
    /// treated as absent. Records with neither identifier are rejected.
    ///
    /// # Errors
    /// Returns an error naming the offending title when no identifier is
    /// present.
    pub fn normalize(self) -> Result<Task, String> {
        let id = [self.id, self.legacy_id]
            .into_iter()
            .flatten()
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .ok_or_else(|| format!("Task record '{}' has no identifier", self.title))?;

        Ok(Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            created_at: self.created_at,
        })
    }
}

/// An in-progress, unsaved task edit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl TaskDraft {
    /// Seeds a draft from an existing task, for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }

    /// Checks the required-field and length constraints.
    ///
    /// These are the only validations enforced client-side; everything else
    /// is authoritative on the server.
    ///
    /// # Errors
    /// Returns the first constraint violation as a display-ready message.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err(format!("Title must be at most {TITLE_MAX_CHARS} characters"));
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        if self.description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(format!(
                "Description must be at most {DESCRIPTION_MAX_CHARS} characters"
            ));
        }
        Ok(())
    }
}

/// Status filter for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(StatusFilter::All);
        }
        value.parse().map(StatusFilter::Only)
    }
}

/// Server-side query parameters for a task listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskQuery {
    pub status: StatusFilter,
    pub search: String,
}

impl TaskQuery {
    /// Builds the query pairs for `GET /api/tasks`.
    ///
    /// `status` is omitted when the filter is `all`; `search` is omitted
    /// when empty. The server response is trusted verbatim, so these are
    /// never re-applied client-side.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let StatusFilter::Only(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        pairs
    }
}
