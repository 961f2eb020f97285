//! Repository collaborator contract.
//!
//! The state engine does not implement persistence; it consumes an abstract
//! [`TasksRepository`] that owns the canonical task collection. Observation is
//! push-based: the repository publishes [`TasksResult`] values through
//! `tokio::sync::watch` channels (replay-one, current-value-retaining) and
//! controllers derive view-state from the latest value.

use crate::task::{Task, TaskId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tokio::sync::watch;

/// Errors surfaced by a repository implementation.
///
/// Cloneable so results can be retained inside watch channels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The requested task does not exist.
    #[error("Task {0} not found")]
    NotFound(TaskId),

    /// The underlying task source could not be reached.
    #[error("Task source unavailable: {0}")]
    Unavailable(String),
}

/// Tagged observation result.
///
/// `Loading` signals that the repository has no data yet. Controllers treat it
/// as "nothing to show" without raising an error; the manually managed
/// loading flag stays authoritative for the `is_loading` presented to the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TasksResult<T> {
    /// Data is available.
    Success(T),
    /// Observation failed.
    Error(RepositoryError),
    /// No data yet.
    Loading,
}

impl<T> TasksResult<T> {
    /// Whether this result carries data.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether this result is an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The carried data, if any.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error(_) | Self::Loading => None,
        }
    }
}

/// Boxed future returned by repository operations.
///
/// # Dyn Compatibility
///
/// The trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` to enable trait object usage (`Arc<dyn TasksRepository>`),
/// which the controllers rely on for dependency injection.
pub type RepositoryFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Abstract task repository.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; controllers observe and mutate
/// concurrently from spawned tasks.
///
/// # Contract
///
/// - Observation channels retain the latest value and must reflect every
///   mutation (`complete_task`, `delete_task`, ...) so controllers can derive
///   state without optimistic local updates.
/// - `refresh_*` reload from the authoritative source and resolve when the
///   reload completes, successfully or not.
pub trait TasksRepository: Send + Sync {
    /// Observe the full task collection.
    ///
    /// The receiver's current value is the latest known result; subsequent
    /// changes are signaled through the channel.
    fn observe_tasks(&self) -> watch::Receiver<TasksResult<Vec<Task>>>;

    /// Observe a single task by id.
    ///
    /// Emits `Success(None)` when the task does not exist (and after it is
    /// deleted).
    fn observe_task(&self, id: &TaskId) -> watch::Receiver<TasksResult<Option<Task>>>;

    /// Reload the task collection from its authoritative source.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] when the source cannot be
    /// reached; observation channels surface the same failure.
    fn refresh_tasks(&self) -> RepositoryFuture<'_, Result<(), RepositoryError>>;

    /// Reload a single task from its authoritative source.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] when the source cannot be
    /// reached.
    fn refresh_task(&self, id: &TaskId) -> RepositoryFuture<'_, Result<(), RepositoryError>>;

    /// Persist a task's completion.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the task no longer exists.
    fn complete_task(&self, task: &Task) -> RepositoryFuture<'_, Result<(), RepositoryError>>;

    /// Persist a task's re-activation.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the task no longer exists.
    fn activate_task(&self, task: &Task) -> RepositoryFuture<'_, Result<(), RepositoryError>>;

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the task no longer exists.
    fn delete_task(&self, id: &TaskId) -> RepositoryFuture<'_, Result<(), RepositoryError>>;

    /// Delete every completed task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] when the source cannot be
    /// reached.
    fn clear_completed_tasks(&self) -> RepositoryFuture<'_, Result<(), RepositoryError>>;
}
