//! Integration tests for the task detail controller
//!
//! Exercises id tracking (including the flat-map-latest resubscription),
//! completion toggling, deletion, navigation signals, and error handling
//! against the in-memory fake repository.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use taskstream_core::message::{DetailNavigation, UserMessage};
use taskstream_core::repository::TasksRepository;
use taskstream_core::task::{Task, TaskId};
use taskstream_runtime::TaskDetailController;
use taskstream_testing::{FakeTasksRepository, expect_no_event, next_event, wait_for_state};

// ============================================================================
// Test Fixtures
// ============================================================================

fn seeded_repository() -> (Arc<FakeTasksRepository>, Task) {
    let repo = Arc::new(FakeTasksRepository::new());
    let task = Task::new("Review draft", "Second pass before sending");
    repo.add_tasks([task.clone()]);
    (repo, task)
}

// ============================================================================
// Id Tracking
// ============================================================================

#[tokio::test]
async fn start_loads_the_tracked_task() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo);

    controller.start(Some(task.id.clone()));

    let mut state = controller.state();
    let current = wait_for_state(&mut state, |s| s.task.is_some()).await;
    assert_eq!(current.task, Some(task));
    assert!(!current.is_task_completed);
}

#[tokio::test]
async fn start_with_unknown_id_yields_no_task() {
    let (repo, _) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    controller.start(Some(TaskId::new("no-such-task")));

    // The fake resolves unknown ids to Success(None); the state settles with
    // no task loaded.
    while repo.observe_task_calls() == 0 {
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    let mut state = controller.state();
    let current = wait_for_state(&mut state, |s| !s.is_loading).await;
    assert_eq!(current.task, None);
}

#[tokio::test]
async fn starting_the_same_id_again_does_not_resubscribe() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    controller.start(Some(task.id.clone()));
    let mut state = controller.state();
    let _ = wait_for_state(&mut state, |s| s.task.is_some()).await;

    controller.start(Some(task.id.clone()));
    assert_eq!(repo.observe_task_calls(), 1);
}

#[tokio::test]
async fn switching_ids_drops_the_old_stream() {
    let (repo, first) = seeded_repository();
    let second = Task::new("Send invoice", "").set_completed(true);
    repo.add_tasks([second.clone()]);
    let controller = TaskDetailController::new(repo.clone());

    controller.start(Some(first.id.clone()));
    let mut state = controller.state();
    let _ = wait_for_state(&mut state, |s| s.task.as_ref() == Some(&first)).await;

    controller.start(Some(second.id.clone()));
    let current = wait_for_state(&mut state, |s| s.task.as_ref() == Some(&second)).await;
    assert!(current.is_task_completed);
    assert_eq!(repo.observe_task_calls(), 2);
}

#[tokio::test]
async fn external_deletion_clears_the_loaded_task() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    controller.start(Some(task.id.clone()));
    let mut state = controller.state();
    let _ = wait_for_state(&mut state, |s| s.task.is_some()).await;

    let _ = repo.delete_task(&task.id).await;
    let _ = wait_for_state(&mut state, |s| s.task.is_none()).await;
}

// ============================================================================
// Completion Toggling
// ============================================================================

#[tokio::test]
async fn set_completed_persists_and_notifies() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    controller.start(Some(task.id.clone()));
    let mut state = controller.state();
    let _ = wait_for_state(&mut state, |s| s.task.is_some()).await;

    let mut messages = controller.user_messages();
    controller.set_completed(true).await;

    assert!(repo.get_task(&task.id).unwrap().is_completed());
    assert_eq!(next_event(&mut messages).await, UserMessage::TaskMarkedComplete);
    let current = wait_for_state(&mut state, |s| s.is_task_completed).await;
    assert!(current.task.unwrap().is_completed());
}

#[tokio::test]
async fn set_active_persists_and_notifies() {
    let repo = Arc::new(FakeTasksRepository::new());
    let task = Task::new("Archive inbox", "").set_completed(true);
    repo.add_tasks([task.clone()]);
    let controller = TaskDetailController::new(repo.clone());

    controller.start(Some(task.id.clone()));
    let mut state = controller.state();
    let _ = wait_for_state(&mut state, |s| s.task.is_some()).await;

    let mut messages = controller.user_messages();
    controller.set_completed(false).await;

    assert!(repo.get_task(&task.id).unwrap().is_active());
    assert_eq!(next_event(&mut messages).await, UserMessage::TaskMarkedActive);
}

#[tokio::test]
async fn set_completed_without_loaded_task_is_a_no_op() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    let mut messages = controller.user_messages();
    controller.set_completed(true).await;

    assert!(repo.get_task(&task.id).unwrap().is_active());
    expect_no_event(&mut messages).await;
}

// ============================================================================
// Deletion and Navigation
// ============================================================================

#[tokio::test]
async fn delete_task_removes_it_and_signals_departure() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    controller.start(Some(task.id.clone()));
    let mut state = controller.state();
    let _ = wait_for_state(&mut state, |s| s.task.is_some()).await;

    let mut navigation = controller.navigation();
    controller.delete_task().await;

    assert_eq!(repo.get_task(&task.id), None);
    assert_eq!(next_event(&mut navigation).await, DetailNavigation::Deleted);
}

#[tokio::test]
async fn delete_without_tracked_id_is_a_no_op() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    let mut navigation = controller.navigation();
    controller.delete_task().await;

    assert!(repo.get_task(&task.id).is_some());
    expect_no_event(&mut navigation).await;
}

#[tokio::test]
async fn edit_task_signals_the_edit_flow() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo);
    controller.start(Some(task.id));

    let mut navigation = controller.navigation();
    controller.edit_task();

    assert_eq!(next_event(&mut navigation).await, DetailNavigation::Edit);
}

// ============================================================================
// Refresh and Error Handling
// ============================================================================

#[tokio::test]
async fn refresh_toggles_loading_flag_in_order() {
    let (repo, task) = seeded_repository();
    let controller = Arc::new(TaskDetailController::new(repo.clone()));

    controller.start(Some(task.id.clone()));
    let mut state = controller.state();
    let _ = wait_for_state(&mut state, |s| s.task.is_some()).await;

    repo.hold_refreshes();
    let refreshing = Arc::clone(&controller);
    let handle = tokio::spawn(async move { refreshing.refresh().await });

    let _ = wait_for_state(&mut state, |s| s.is_loading).await;
    repo.release_refreshes();
    let _ = wait_for_state(&mut state, |s| !s.is_loading).await;
    assert!(handle.await.is_ok());
}

#[tokio::test]
async fn refresh_without_tracked_id_is_a_no_op() {
    let (repo, _) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    controller.refresh().await;
    assert_eq!(repo.refresh_task_calls(), 0);
}

#[tokio::test]
async fn observation_error_clears_task_and_notifies() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    controller.start(Some(task.id.clone()));
    let mut state = controller.state();
    let _ = wait_for_state(&mut state, |s| s.task.is_some()).await;

    let mut messages = controller.user_messages();
    repo.set_return_error(true);

    let _ = wait_for_state(&mut state, |s| s.task.is_none()).await;
    assert_eq!(next_event(&mut messages).await, UserMessage::LoadingTasksError);
}

#[tokio::test]
async fn refresh_during_error_does_not_renotify() {
    let (repo, task) = seeded_repository();
    let controller = TaskDetailController::new(repo.clone());

    controller.start(Some(task.id.clone()));
    let mut state = controller.state();
    let _ = wait_for_state(&mut state, |s| s.task.is_some()).await;

    let mut messages = controller.user_messages();
    repo.set_return_error(true);
    let _ = wait_for_state(&mut state, |s| s.task.is_none()).await;
    assert_eq!(next_event(&mut messages).await, UserMessage::LoadingTasksError);

    // The refresh toggles the loading flag while the error persists; neither
    // wake repeats the notification.
    controller.refresh().await;
    let _ = wait_for_state(&mut state, |s| !s.is_loading).await;
    expect_no_event(&mut messages).await;
}
