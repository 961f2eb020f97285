//! Task detail state controller.
//!
//! Tracks a single task by id and derives [`DetailViewState`] from its
//! observation stream plus a manually managed loading flag. Switching ids
//! drops the old single-task stream and subscribes the new one; starting with
//! the already-tracked id is an explicit no-op.

use crate::config::ControllerConfig;
use crate::scope::ControllerScope;
use std::sync::Arc;
use taskstream_core::message::{DetailNavigation, UserMessage};
use taskstream_core::repository::{TasksRepository, TasksResult};
use taskstream_core::task::TaskId;
use taskstream_core::view_state::DetailViewState;
use tokio::sync::{broadcast, watch};

/// Controller deriving the task detail screen's view-state.
///
/// # Lifecycle
///
/// Construction spawns the observation loop; nothing is observed until
/// [`TaskDetailController::start`] supplies a task id. Dropping the controller
/// cancels the loop and any in-flight refresh.
pub struct TaskDetailController {
    repository: Arc<dyn TasksRepository>,
    task_id_tx: watch::Sender<Option<TaskId>>,
    state_tx: watch::Sender<DetailViewState>,
    loading_tx: watch::Sender<bool>,
    messages_tx: broadcast::Sender<UserMessage>,
    navigation_tx: broadcast::Sender<DetailNavigation>,
    scope: ControllerScope,
}

impl TaskDetailController {
    /// Create a controller with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<dyn TasksRepository>) -> Self {
        Self::with_config(repository, ControllerConfig::default())
    }

    /// Create a controller with a custom configuration.
    #[must_use]
    pub fn with_config(repository: Arc<dyn TasksRepository>, config: ControllerConfig) -> Self {
        let (task_id_tx, _) = watch::channel(None);
        let (state_tx, _) = watch::channel(DetailViewState::default());
        let (loading_tx, _) = watch::channel(false);
        let (messages_tx, _) = broadcast::channel(config.event_capacity());
        let (navigation_tx, _) = broadcast::channel(config.event_capacity());

        let controller = Self {
            repository,
            task_id_tx,
            state_tx,
            loading_tx,
            messages_tx,
            navigation_tx,
            scope: ControllerScope::new(),
        };

        controller.spawn_observation();
        controller
    }

    /// The current-value-retaining view-state stream.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<DetailViewState> {
        self.state_tx.subscribe()
    }

    /// One-shot user notifications. Late subscribers miss earlier emissions.
    #[must_use]
    pub fn user_messages(&self) -> broadcast::Receiver<UserMessage> {
        self.messages_tx.subscribe()
    }

    /// One-shot navigation intents. Late subscribers miss earlier emissions.
    #[must_use]
    pub fn navigation(&self) -> broadcast::Receiver<DetailNavigation> {
        self.navigation_tx.subscribe()
    }

    /// Track a task by id.
    ///
    /// Starting with the currently tracked id is a no-op (a configuration
    /// change replays the same id); otherwise the old single-task stream is
    /// dropped and the new id observed.
    pub fn start(&self, task_id: Option<TaskId>) {
        if *self.task_id_tx.borrow() == task_id {
            return;
        }
        self.task_id_tx.send_replace(task_id);
    }

    /// Persist the loaded task's completion flag and notify the user.
    ///
    /// Silent no-op when no task is loaded.
    pub async fn set_completed(&self, completed: bool) {
        let loaded = self.state_tx.borrow().task.clone();
        let Some(task) = loaded else {
            return;
        };

        let outcome = if completed {
            self.repository.complete_task(&task).await
        } else {
            self.repository.activate_task(&task).await
        };

        match outcome {
            Ok(()) => {
                let message = if completed {
                    UserMessage::TaskMarkedComplete
                } else {
                    UserMessage::TaskMarkedActive
                };
                let _ = self.messages_tx.send(message);
            }
            Err(error) => tracing::warn!(%error, "completion toggle failed"),
        }
    }

    /// Delete the tracked task, then emit the deleted navigation signal.
    ///
    /// Silent no-op when no id is tracked.
    pub async fn delete_task(&self) {
        let tracked = self.task_id_tx.borrow().clone();
        let Some(id) = tracked else {
            return;
        };

        match self.repository.delete_task(&id).await {
            Ok(()) => {
                let _ = self.navigation_tx.send(DetailNavigation::Deleted);
            }
            Err(error) => tracing::warn!(%error, "task delete failed"),
        }
    }

    /// Emit the edit navigation signal. No persistence side effect.
    pub fn edit_task(&self) {
        let _ = self.navigation_tx.send(DetailNavigation::Edit);
    }

    /// Reload the tracked task from its authoritative source.
    ///
    /// Silent no-op when no id is tracked. The loading flag is raised before
    /// the reload and cleared when it completes, successfully or not.
    pub async fn refresh(&self) {
        let tracked = self.task_id_tx.borrow().clone();
        let Some(id) = tracked else {
            return;
        };

        self.loading_tx.send_replace(true);
        if let Err(error) = self.repository.refresh_task(&id).await {
            tracing::warn!(%error, "task refresh failed");
        }
        self.loading_tx.send_replace(false);
    }

    /// Explicit flat-map-latest: the outer loop follows the tracked id, the
    /// inner loop combines the current single-task stream with the loading
    /// flag.
    fn spawn_observation(&self) {
        let repository = Arc::clone(&self.repository);
        let state_tx = self.state_tx.clone();
        let messages_tx = self.messages_tx.clone();
        let mut task_id_rx = self.task_id_tx.subscribe();
        let mut loading_rx = self.loading_tx.subscribe();

        self.scope.spawn(async move {
            loop {
                let tracked = task_id_rx.borrow_and_update().clone();
                let Some(id) = tracked else {
                    state_tx.send_replace(DetailViewState::default());
                    if task_id_rx.changed().await.is_err() {
                        break;
                    }
                    continue;
                };

                let mut task_rx = repository.observe_task(&id);
                // A loading-flag wake re-derives from an already-notified
                // error; only a fresh observation value notifies again.
                let mut error_notified = false;
                loop {
                    let result = task_rx.borrow_and_update().clone();
                    let is_loading = *loading_rx.borrow_and_update();

                    let task = match result {
                        TasksResult::Success(task) => task,
                        TasksResult::Error(error) => {
                            if !error_notified {
                                error_notified = true;
                                tracing::warn!(%error, "task observation failed");
                                let _ = messages_tx.send(UserMessage::LoadingTasksError);
                            }
                            None
                        }
                        TasksResult::Loading => None,
                    };

                    state_tx.send_replace(DetailViewState::derived(task, is_loading));

                    tokio::select! {
                        changed = task_id_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            // Switch to the newly tracked id.
                            break;
                        }
                        changed = task_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            error_notified = false;
                        }
                        changed = loading_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                    }
                }
            }
            tracing::debug!("task detail observation ended");
        });
    }
}
