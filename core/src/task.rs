//! Task entity and identifier types.
//!
//! This module defines the strong identifier type (`TaskId`) and the task
//! record (`Task`) that every other component derives its state from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error type for `TaskId` parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid task ID: {0}")]
pub struct ParseTaskIdError(String);

/// Unique, stable identifier for a task.
///
/// Wraps whatever string form the repository hands out. Fresh ids come from
/// [`TaskId::generate`] as UUIDv4 strings, but a backend is free to use any
/// non-empty scheme; the newtype only keeps task ids from mixing with other
/// strings in signatures and serializes transparently for storage.
///
/// Parsing with `FromStr` rejects the empty string and is the right entry
/// point for external input. `new()` and the `From` conversions skip that
/// check and are meant for ids the application already controls.
///
/// # Examples
///
/// ```
/// use taskstream_core::task::TaskId;
///
/// let id = TaskId::new("task-12345");
/// assert_eq!(id.as_str(), "task-12345");
///
/// let parsed: TaskId = "task-abc".parse().unwrap();
/// assert_eq!(parsed, TaskId::new("task-abc"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Create a new `TaskId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random `TaskId` (UUIDv4).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the task ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the `TaskId` into its inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseTaskIdError("Task ID cannot be empty".to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single task.
///
/// Tasks are plain data: the repository owns the canonical collection and
/// controllers only hold copies for presentation. The only mutation the
/// domain performs is toggling the completion flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Short title of the task
    pub title: String,
    /// Longer free-form description
    pub description: String,
    /// Whether the task has been completed
    pub completed: bool,
}

impl Task {
    /// Creates a new active task with a generated ID.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// Creates a task with an explicit ID (e.g. when rehydrating from storage).
    #[must_use]
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        completed: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed,
        }
    }

    /// Marks the task completed or active, consuming and returning it.
    #[must_use]
    pub fn set_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the task is still active (not completed).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod task_id_tests {
        use super::*;

        #[test]
        fn new_creates_task_id() {
            let id = TaskId::new("task-123");
            assert_eq!(id.as_str(), "task-123");
        }

        #[test]
        fn generate_creates_unique_ids() {
            let a = TaskId::generate();
            let b = TaskId::generate();
            assert_ne!(a, b);
            assert!(!a.as_str().is_empty());
        }

        #[test]
        #[allow(clippy::expect_used)] // Panics: Test will fail if parse fails
        fn parse_from_str() {
            let id: TaskId = "task-123".parse().expect("parse should succeed");
            assert_eq!(id, TaskId::new("task-123"));
        }

        #[test]
        fn parse_empty_string_fails() {
            let result = "".parse::<TaskId>();
            assert!(result.is_err());
        }

        #[test]
        fn display() {
            let id = TaskId::new("task-123");
            assert_eq!(format!("{id}"), "task-123");
        }

        #[test]
        fn into_inner() {
            let id = TaskId::new("task-123");
            assert_eq!(id.into_inner(), "task-123");
        }
    }

    mod task_tests {
        use super::*;

        #[test]
        fn new_task_is_active() {
            let task = Task::new("Title", "Description");
            assert_eq!(task.title, "Title");
            assert_eq!(task.description, "Description");
            assert!(task.is_active());
            assert!(!task.is_completed());
        }

        #[test]
        fn with_id_keeps_id() {
            let id = TaskId::new("fixed");
            let task = Task::with_id(id.clone(), "Title", "", true);
            assert_eq!(task.id, id);
            assert!(task.is_completed());
        }

        #[test]
        fn set_completed_toggles_predicates() {
            let task = Task::new("Title", "").set_completed(true);
            assert!(task.is_completed());
            assert!(!task.is_active());

            let task = task.set_completed(false);
            assert!(task.is_active());
        }
    }
}
