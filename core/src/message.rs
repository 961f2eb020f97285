//! One-shot signal tags: user notifications and navigation intents.
//!
//! These enums identify *what* to tell the user or *where* to navigate; the
//! presentation layer owns the concrete strings and routing. They are
//! delivered through broadcast channels with fire-and-forget semantics: a
//! subscriber that attaches after an emission misses it.

use crate::task::TaskId;
use serde::{Deserialize, Serialize};

/// Identifier for a user-facing notification (snackbar/toast analog).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserMessage {
    /// Loading tasks from the repository failed
    LoadingTasksError,
    /// A task was marked complete
    TaskMarkedComplete,
    /// A task was marked active
    TaskMarkedActive,
    /// All completed tasks were cleared
    CompletedTasksCleared,
    /// A task edit was saved
    TaskSaved,
    /// A new task was added
    TaskAdded,
    /// A task was deleted
    TaskDeleted,
}

/// Result code handed back to the list screen by an add/edit/delete flow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditResult {
    /// An existing task was edited successfully
    EditOk,
    /// A new task was added successfully
    AddEditOk,
    /// A task was deleted successfully
    DeleteOk,
}

impl EditResult {
    /// The notification shown for this result.
    #[must_use]
    pub const fn message(self) -> UserMessage {
        match self {
            Self::EditOk => UserMessage::TaskSaved,
            Self::AddEditOk => UserMessage::TaskAdded,
            Self::DeleteOk => UserMessage::TaskDeleted,
        }
    }
}

/// Navigation intent emitted by the task list controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListNavigation {
    /// Open the add-task flow
    AddNewTask,
    /// Open the detail screen for a task
    OpenTask(TaskId),
}

/// Navigation intent emitted by the task detail controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailNavigation {
    /// Open the edit flow for the tracked task
    Edit,
    /// The tracked task was deleted; leave the screen
    Deleted,
}
