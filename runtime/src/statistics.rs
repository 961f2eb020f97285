//! Statistics state controller.
//!
//! Derives [`StatisticsViewState`] from the repository's task observation
//! stream: completion percentages on success, an error flag on observation
//! failure, retained values while the repository has no data yet.

use crate::config::ControllerConfig;
use crate::scope::ControllerScope;
use std::sync::Arc;
use taskstream_core::repository::{TasksRepository, TasksResult};
use taskstream_core::statistics::Statistics;
use taskstream_core::view_state::StatisticsViewState;
use tokio::sync::watch;

/// Controller deriving the statistics screen's view-state.
pub struct StatisticsController {
    repository: Arc<dyn TasksRepository>,
    state_tx: watch::Sender<StatisticsViewState>,
    loading_tx: watch::Sender<bool>,
    scope: ControllerScope,
}

impl StatisticsController {
    /// Create a controller with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<dyn TasksRepository>) -> Self {
        Self::with_config(repository, ControllerConfig::default())
    }

    /// Create a controller with a custom configuration.
    ///
    /// The statistics screen emits no one-shot events, so the configuration
    /// is accepted for uniformity with the other controllers.
    #[must_use]
    pub fn with_config(repository: Arc<dyn TasksRepository>, _config: ControllerConfig) -> Self {
        let (state_tx, _) = watch::channel(StatisticsViewState::default());
        let (loading_tx, _) = watch::channel(false);

        let controller = Self {
            repository,
            state_tx,
            loading_tx,
            scope: ControllerScope::new(),
        };

        controller.spawn_observation();
        controller
    }

    /// The current-value-retaining view-state stream.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<StatisticsViewState> {
        self.state_tx.subscribe()
    }

    /// Reload the task list from its authoritative source.
    ///
    /// The loading flag is raised before the reload and cleared when it
    /// completes, successfully or not.
    pub async fn refresh(&self) {
        self.loading_tx.send_replace(true);
        if let Err(error) = self.repository.refresh_tasks().await {
            tracing::warn!(%error, "statistics refresh failed");
        }
        self.loading_tx.send_replace(false);
    }

    fn spawn_observation(&self) {
        let repository = Arc::clone(&self.repository);
        let state_tx = self.state_tx.clone();
        let mut loading_rx = self.loading_tx.subscribe();

        self.scope.spawn(async move {
            let mut tasks_rx = repository.observe_tasks();
            loop {
                let result = tasks_rx.borrow_and_update().clone();
                let is_loading = *loading_rx.borrow_and_update();

                let derived = match result {
                    TasksResult::Success(tasks) => {
                        let stats = Statistics::compute(&tasks);
                        StatisticsViewState {
                            is_loading,
                            active_tasks_percent: stats.active_tasks_percent,
                            completed_tasks_percent: stats.completed_tasks_percent,
                            is_empty: stats.is_empty,
                            is_error: false,
                        }
                    }
                    TasksResult::Error(error) => {
                        tracing::warn!(%error, "task observation failed");
                        StatisticsViewState {
                            is_loading,
                            is_error: true,
                            ..StatisticsViewState::default()
                        }
                    }
                    // No data yet; keep the previous figures visible.
                    TasksResult::Loading => StatisticsViewState {
                        is_loading,
                        ..state_tx.borrow().clone()
                    },
                };

                state_tx.send_replace(derived);

                tokio::select! {
                    changed = tasks_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = loading_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("statistics observation ended");
        });
    }
}
