//! Create/edit form state machine.
//!
//! `Closed → Creating` opens a blank draft; `Closed → Editing` seeds the
//! draft from an existing task. Both return to `Closed` on cancel or
//! successful submit; a failed submit leaves the form open with the draft
//! intact.

use taskdeck_core::tasks::{Task, TaskDraft};

/// State of the task form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Creating {
        draft: TaskDraft,
    },
    Editing {
        id: String,
        draft: TaskDraft,
    },
}

impl FormState {
    /// Opens a blank create form.
    pub fn open_blank() -> Self {
        FormState::Creating {
            draft: TaskDraft::default(),
        }
    }

    /// Opens an edit form seeded from `task`.
    pub fn open_for(task: &Task) -> Self {
        FormState::Editing {
            id: task.id.clone(),
            draft: TaskDraft::from_task(task),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }

    /// Returns true when the form is editing an existing task.
    pub fn is_editing(&self) -> bool {
        matches!(self, FormState::Editing { .. })
    }

    /// Replaces the draft, if the form is open.
    pub fn set_draft(&mut self, new_draft: TaskDraft) {
        match self {
            FormState::Closed => {}
            FormState::Creating { draft } | FormState::Editing { draft, .. } => *draft = new_draft,
        }
    }

    /// Returns the submission target: the draft plus the id when editing.
    pub fn submit_target(&self) -> Option<(Option<String>, TaskDraft)> {
        match self {
            FormState::Closed => None,
            FormState::Creating { draft } => Some((None, draft.clone())),
            FormState::Editing { id, draft } => Some((Some(id.clone()), draft.clone())),
        }
    }
}
