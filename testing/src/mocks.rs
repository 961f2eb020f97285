//! Fake repository for deterministic controller tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use taskstream_core::repository::{
    RepositoryError, RepositoryFuture, TasksRepository, TasksResult,
};
use taskstream_core::task::{Task, TaskId};
use tokio::sync::{Notify, watch};

struct Inner {
    tasks: Vec<Task>,
    return_error: bool,
    task_watchers: HashMap<TaskId, watch::Sender<TasksResult<Option<Task>>>>,
}

/// In-memory [`TasksRepository`] double.
///
/// Keeps tasks in insertion order and publishes every mutation through its
/// watch channels. Publishing is conflated: a value equal to the channel's
/// current one is skipped, so a refresh that changes nothing signals no
/// observer. On top of that it adds the instrumentation the controller tests
/// need:
///
/// - **Error injection**: [`set_return_error`](Self::set_return_error) makes
///   every observation channel carry an error until cleared.
/// - **Call counting**: `observe_task` / `refresh_tasks` / `refresh_task`
///   invocations are counted, so tests can assert that an idempotent `start`
///   does not re-subscribe.
/// - **Refresh gating**: [`hold_refreshes`](Self::hold_refreshes) parks
///   refresh calls until released, making loading-flag transitions observable
///   instead of racing past the watch channel's value coalescing.
pub struct FakeTasksRepository {
    inner: Mutex<Inner>,
    tasks_tx: watch::Sender<TasksResult<Vec<Task>>>,
    gate_closed: AtomicBool,
    gate: Notify,
    observe_task_calls: AtomicUsize,
    refresh_tasks_calls: AtomicUsize,
    refresh_task_calls: AtomicUsize,
}

impl FakeTasksRepository {
    /// Create an empty fake repository.
    #[must_use]
    pub fn new() -> Self {
        let (tasks_tx, _) = watch::channel(TasksResult::Success(Vec::new()));
        Self {
            inner: Mutex::new(Inner {
                tasks: Vec::new(),
                return_error: false,
                task_watchers: HashMap::new(),
            }),
            tasks_tx,
            gate_closed: AtomicBool::new(false),
            gate: Notify::new(),
            observe_task_calls: AtomicUsize::new(0),
            refresh_tasks_calls: AtomicUsize::new(0),
            refresh_task_calls: AtomicUsize::new(0),
        }
    }

    /// Insert or replace tasks, keyed by id, preserving insertion order.
    pub fn add_tasks(&self, tasks: impl IntoIterator<Item = Task>) {
        let mut inner = self.lock();
        for task in tasks {
            if let Some(existing) = inner.tasks.iter_mut().find(|t| t.id == task.id) {
                *existing = task;
            } else {
                inner.tasks.push(task);
            }
        }
        Self::publish(&inner, &self.tasks_tx);
    }

    /// Make every observation channel carry an error (or clear it again).
    pub fn set_return_error(&self, return_error: bool) {
        let mut inner = self.lock();
        inner.return_error = return_error;
        Self::publish(&inner, &self.tasks_tx);
    }

    /// Park refresh calls until [`release_refreshes`](Self::release_refreshes).
    pub fn hold_refreshes(&self) {
        self.gate_closed.store(true, Ordering::Release);
    }

    /// Let parked and future refresh calls proceed.
    pub fn release_refreshes(&self) {
        self.gate_closed.store(false, Ordering::Release);
        self.gate.notify_waiters();
    }

    /// Snapshot of the stored tasks, in insertion order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Look up a stored task by id.
    #[must_use]
    pub fn get_task(&self, id: &TaskId) -> Option<Task> {
        self.lock().tasks.iter().find(|t| &t.id == id).cloned()
    }

    /// Number of `observe_task` invocations so far.
    #[must_use]
    pub fn observe_task_calls(&self) -> usize {
        self.observe_task_calls.load(Ordering::Acquire)
    }

    /// Number of `refresh_tasks` invocations so far.
    #[must_use]
    pub fn refresh_tasks_calls(&self) -> usize {
        self.refresh_tasks_calls.load(Ordering::Acquire)
    }

    /// Number of `refresh_task` invocations so far.
    #[must_use]
    pub fn refresh_task_calls(&self) -> usize {
        self.refresh_task_calls.load(Ordering::Acquire)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicked test thread must not wedge the whole suite.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Push the current state into the list channel and every task watcher.
    fn publish(inner: &Inner, tasks_tx: &watch::Sender<TasksResult<Vec<Task>>>) {
        if inner.return_error {
            let error = RepositoryError::Unavailable("test error".to_string());
            Self::send_conflated(tasks_tx, TasksResult::Error(error.clone()));
            for watcher in inner.task_watchers.values() {
                Self::send_conflated(watcher, TasksResult::Error(error.clone()));
            }
            return;
        }

        Self::send_conflated(tasks_tx, TasksResult::Success(inner.tasks.clone()));
        for (id, watcher) in &inner.task_watchers {
            let task = inner.tasks.iter().find(|t| &t.id == id).cloned();
            Self::send_conflated(watcher, TasksResult::Success(task));
        }
    }

    /// Conflated send: republishing a value equal to the current one does not
    /// signal observers, so a refresh that changes nothing stays silent.
    fn send_conflated<T: PartialEq>(tx: &watch::Sender<T>, value: T) {
        tx.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    async fn pass_gate(&self) {
        while self.gate_closed.load(Ordering::Acquire) {
            let notified = self.gate.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            // Re-check so a release between the load and `enable` is not missed.
            if !self.gate_closed.load(Ordering::Acquire) {
                return;
            }
            notified.await;
        }
    }
}

impl Default for FakeTasksRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TasksRepository for FakeTasksRepository {
    fn observe_tasks(&self) -> watch::Receiver<TasksResult<Vec<Task>>> {
        self.tasks_tx.subscribe()
    }

    fn observe_task(&self, id: &TaskId) -> watch::Receiver<TasksResult<Option<Task>>> {
        self.observe_task_calls.fetch_add(1, Ordering::AcqRel);
        let mut inner = self.lock();

        let initial = if inner.return_error {
            TasksResult::Error(RepositoryError::Unavailable("test error".to_string()))
        } else {
            TasksResult::Success(inner.tasks.iter().find(|t| &t.id == id).cloned())
        };

        inner
            .task_watchers
            .entry(id.clone())
            .or_insert_with(|| watch::channel(initial).0)
            .subscribe()
    }

    fn refresh_tasks(&self) -> RepositoryFuture<'_, Result<(), RepositoryError>> {
        self.refresh_tasks_calls.fetch_add(1, Ordering::AcqRel);
        Box::pin(async move {
            self.pass_gate().await;
            let inner = self.lock();
            Self::publish(&inner, &self.tasks_tx);
            Ok(())
        })
    }

    // The fake republishes everything on any refresh, so the id is not needed.
    fn refresh_task(&self, _id: &TaskId) -> RepositoryFuture<'_, Result<(), RepositoryError>> {
        self.refresh_task_calls.fetch_add(1, Ordering::AcqRel);
        Box::pin(async move {
            self.pass_gate().await;
            let inner = self.lock();
            Self::publish(&inner, &self.tasks_tx);
            Ok(())
        })
    }

    fn complete_task(&self, task: &Task) -> RepositoryFuture<'_, Result<(), RepositoryError>> {
        let id = task.id.clone();
        Box::pin(async move {
            let mut inner = self.lock();
            let Some(stored) = inner.tasks.iter_mut().find(|t| t.id == id) else {
                return Err(RepositoryError::NotFound(id));
            };
            stored.completed = true;
            Self::publish(&inner, &self.tasks_tx);
            Ok(())
        })
    }

    fn activate_task(&self, task: &Task) -> RepositoryFuture<'_, Result<(), RepositoryError>> {
        let id = task.id.clone();
        Box::pin(async move {
            let mut inner = self.lock();
            let Some(stored) = inner.tasks.iter_mut().find(|t| t.id == id) else {
                return Err(RepositoryError::NotFound(id));
            };
            stored.completed = false;
            Self::publish(&inner, &self.tasks_tx);
            Ok(())
        })
    }

    fn delete_task(&self, id: &TaskId) -> RepositoryFuture<'_, Result<(), RepositoryError>> {
        let id = id.clone();
        Box::pin(async move {
            let mut inner = self.lock();
            let before = inner.tasks.len();
            inner.tasks.retain(|t| t.id != id);
            if inner.tasks.len() == before {
                return Err(RepositoryError::NotFound(id));
            }
            Self::publish(&inner, &self.tasks_tx);
            Ok(())
        })
    }

    fn clear_completed_tasks(&self) -> RepositoryFuture<'_, Result<(), RepositoryError>> {
        Box::pin(async move {
            let mut inner = self.lock();
            inner.tasks.retain(Task::is_active);
            Self::publish(&inner, &self.tasks_tx);
            Ok(())
        })
    }
}
