//! Task list state controller.
//!
//! Combines the repository's task observation stream, the current filter
//! selection, and a manually managed loading flag into a single
//! [`ListViewState`] stream, and exposes the list screen's operations
//! (filtering, refresh, completion toggling, clearing, navigation intents,
//! result notifications).

use crate::config::ControllerConfig;
use crate::scope::ControllerScope;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use taskstream_core::filter::FilterMode;
use taskstream_core::message::{EditResult, ListNavigation, UserMessage};
use taskstream_core::repository::{TasksRepository, TasksResult};
use taskstream_core::task::{Task, TaskId};
use taskstream_core::view_state::ListViewState;
use tokio::sync::{broadcast, watch};

/// Controller deriving the task list screen's view-state.
///
/// # Data Flow
///
/// ```text
/// repository.observe_tasks() ──┐
/// filter watch channel ────────┼─→ combine loop ─→ watch<ListViewState>
/// loading watch channel ───────┘         │
///                                        └─→ broadcast<UserMessage> (one-shot)
/// ```
///
/// The combine loop recomputes the full state from the latest value of every
/// input whenever any one of them changes; a stale input never blocks a new
/// emission. One-shot events are delivered to currently attached subscribers
/// only.
///
/// # Lifecycle
///
/// Construction spawns the combine loop and an initial forced refresh on the
/// controller's own scope. Dropping the controller cancels both.
pub struct TaskListController {
    repository: Arc<dyn TasksRepository>,
    state_tx: watch::Sender<ListViewState>,
    filter_tx: watch::Sender<FilterMode>,
    loading_tx: watch::Sender<bool>,
    messages_tx: broadcast::Sender<UserMessage>,
    navigation_tx: broadcast::Sender<ListNavigation>,
    result_message_shown: AtomicBool,
    scope: ControllerScope,
}

impl TaskListController {
    /// Create a controller with the default configuration.
    ///
    /// Begins observing immediately and triggers an initial forced refresh.
    #[must_use]
    pub fn new(repository: Arc<dyn TasksRepository>) -> Self {
        Self::with_config(repository, ControllerConfig::default())
    }

    /// Create a controller with a custom configuration.
    #[must_use]
    pub fn with_config(repository: Arc<dyn TasksRepository>, config: ControllerConfig) -> Self {
        let (state_tx, _) = watch::channel(ListViewState::default());
        let (filter_tx, _) = watch::channel(FilterMode::default());
        let (loading_tx, _) = watch::channel(false);
        let (messages_tx, _) = broadcast::channel(config.event_capacity());
        let (navigation_tx, _) = broadcast::channel(config.event_capacity());

        let controller = Self {
            repository,
            state_tx,
            filter_tx,
            loading_tx,
            messages_tx,
            navigation_tx,
            result_message_shown: AtomicBool::new(false),
            scope: ControllerScope::new(),
        };

        controller.spawn_observation();
        controller.spawn_initial_refresh();
        controller
    }

    /// The current-value-retaining view-state stream.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<ListViewState> {
        self.state_tx.subscribe()
    }

    /// One-shot user notifications. Late subscribers miss earlier emissions.
    #[must_use]
    pub fn user_messages(&self) -> broadcast::Receiver<UserMessage> {
        self.messages_tx.subscribe()
    }

    /// One-shot navigation intents. Late subscribers miss earlier emissions.
    #[must_use]
    pub fn navigation(&self) -> broadcast::Receiver<ListNavigation> {
        self.navigation_tx.subscribe()
    }

    /// Set the current filter mode.
    ///
    /// The filter channel is the single source of truth for subsequent
    /// derivations; the combine loop re-emits as soon as it observes the
    /// change.
    pub fn set_filtering(&self, mode: FilterMode) {
        self.filter_tx.send_replace(mode);
    }

    /// Reload the task list from its authoritative source.
    ///
    /// When `force` is false this is a no-op. When forced, the loading flag is
    /// raised before the reload and cleared when it completes, successfully or
    /// not. Concurrent refreshes toggle the flag independently; the last
    /// completion wins.
    pub async fn refresh(&self, force: bool) {
        if !force {
            return;
        }
        self.loading_tx.send_replace(true);
        if let Err(error) = self.repository.refresh_tasks().await {
            tracing::warn!(%error, "task refresh failed");
        }
        self.loading_tx.send_replace(false);
    }

    /// Persist a task's completion flag and notify the user.
    ///
    /// Local state is not mutated optimistically; the observation stream
    /// reflects the change. On collaborator failure the notification is
    /// suppressed and the failure logged.
    pub async fn complete_task(&self, task: &Task, completed: bool) {
        let outcome = if completed {
            self.repository.complete_task(task).await
        } else {
            self.repository.activate_task(task).await
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

    /// Delete every completed task and notify the user.
    pub async fn clear_completed_tasks(&self) {
        match self.repository.clear_completed_tasks().await {
            Ok(()) => {
                let _ = self.messages_tx.send(UserMessage::CompletedTasksCleared);
            }
            Err(error) => tracing::warn!(%error, "clearing completed tasks failed"),
        }
    }

    /// Emit the add-task navigation intent. Carries no state.
    pub fn add_new_task(&self) {
        let _ = self.navigation_tx.send(ListNavigation::AddNewTask);
    }

    /// Emit the open-task navigation intent. Carries no state.
    pub fn open_task(&self, id: TaskId) {
        let _ = self.navigation_tx.send(ListNavigation::OpenTask(id));
    }

    /// Show the notification for an add/edit/delete result.
    ///
    /// Only the first call per controller lifetime is honored; repeats are
    /// no-ops. Nothing resets the guard short of reconstructing the
    /// controller.
    pub fn show_result_message(&self, result: EditResult) {
        if self.result_message_shown.swap(true, Ordering::AcqRel) {
            return;
        }
        let _ = self.messages_tx.send(result.message());
    }

    fn spawn_initial_refresh(&self) {
        let repository = Arc::clone(&self.repository);
        let loading_tx = self.loading_tx.clone();
        self.scope.spawn(async move {
            loading_tx.send_replace(true);
            if let Err(error) = repository.refresh_tasks().await {
                tracing::warn!(%error, "initial task refresh failed");
            }
            loading_tx.send_replace(false);
        });
    }

    fn spawn_observation(&self) {
        let repository = Arc::clone(&self.repository);
        let state_tx = self.state_tx.clone();
        let messages_tx = self.messages_tx.clone();
        let mut filter_rx = self.filter_tx.subscribe();
        let mut loading_rx = self.loading_tx.subscribe();

        self.scope.spawn(async move {
            let mut tasks_rx = repository.observe_tasks();
            // A loading-flag wake re-derives state from an already-notified
            // error; only a fresh observation or filter value notifies again.
            let mut error_notified = false;
            loop {
                let result = tasks_rx.borrow_and_update().clone();
                let mode = *filter_rx.borrow_and_update();
                let is_loading = *loading_rx.borrow_and_update();

                let items = match result {
                    TasksResult::Success(tasks) => mode.apply(&tasks),
                    TasksResult::Error(error) => {
                        if !error_notified {
                            error_notified = true;
                            tracing::warn!(%error, "task observation failed");
                            let _ = messages_tx.send(UserMessage::LoadingTasksError);
                        }
                        Vec::new()
                    }
                    // No data yet; the manual flag stays authoritative for
                    // is_loading.
                    TasksResult::Loading => Vec::new(),
                };

                state_tx.send_replace(ListViewState::derived(items, mode.display(), is_loading));

                tokio::select! {
                    changed = tasks_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        error_notified = false;
                    }
                    changed = filter_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        error_notified = false;
                    }
                    changed = loading_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("task list observation ended");
        });
    }
}
