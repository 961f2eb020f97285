//! # Taskstream Runtime
//!
//! State controllers for the taskstream state engine.
//!
//! Each controller owns a combine loop that recomputes an immutable
//! view-state from the latest value of every input (repository observation,
//! filter selection, loading flag) whenever any one of them changes, and
//! publishes it through a current-value-retaining watch channel. One-shot
//! signals (user notifications, navigation intents) go through broadcast
//! channels with fire-and-forget delivery.
//!
//! ## Core Components
//!
//! - [`TaskListController`]: the task list screen (filtering, refresh,
//!   completion toggling, clearing, navigation, result notifications)
//! - [`TaskDetailController`]: a single tracked task (flat-map-latest
//!   observation, completion toggling, edit/delete signals)
//! - [`StatisticsController`]: aggregate completion statistics
//! - [`ControllerScope`]: owner handle cancelling background work on drop
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskstream_runtime::TaskListController;
//!
//! let controller = TaskListController::new(repository);
//! let mut state = controller.state();
//! let mut messages = controller.user_messages();
//!
//! controller.refresh(true).await;
//! println!("{} tasks", state.borrow().items.len());
//! ```

/// Controller configuration
pub mod config;
/// Task detail state controller
pub mod detail;
/// Task list state controller
pub mod list;
/// Controller-owned task scope with cancellation
pub mod scope;
/// Statistics state controller
pub mod statistics;

pub use config::ControllerConfig;
pub use detail::TaskDetailController;
pub use list::TaskListController;
pub use scope::{ControllerScope, ScopeToken};
pub use statistics::StatisticsController;
