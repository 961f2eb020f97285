//! # Taskstream Testing
//!
//! Test doubles and awaiting helpers for exercising the taskstream
//! controllers without a real persistence backend.
//!
//! ## Core Components
//!
//! - [`FakeTasksRepository`]: in-memory repository with error injection,
//!   call counting, and a refresh gate for observing loading transitions
//! - [`wait_for_state`] / [`next_event`] / [`expect_no_event`]: timeout-guarded
//!   channel waits so failing assertions fail fast
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use taskstream_core::repository::TasksRepository;
//! use taskstream_core::task::Task;
//! use taskstream_testing::FakeTasksRepository;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let repo = Arc::new(FakeTasksRepository::new());
//! repo.add_tasks([Task::new("Write tests", "")]);
//!
//! let rx = repo.observe_tasks();
//! assert!(rx.borrow().is_success());
//! # }
//! ```

/// Channel awaiting helpers
pub mod helpers;
/// Repository test doubles
pub mod mocks;

pub use helpers::{expect_no_event, next_event, wait_for_state};
pub use mocks::FakeTasksRepository;
