//! # Taskstream Core
//!
//! Domain types and the repository contract for the taskstream state engine.
//!
//! This crate holds everything that is pure data or pure function:
//!
//! - **Task**: the task entity and its strong identifier
//! - **Filter**: named subset selectors with per-filter display metadata
//! - **Statistics**: aggregate completion statistics
//! - **View-states**: immutable per-screen snapshots
//! - **Messages**: one-shot notification and navigation tags
//! - **Repository**: the abstract collaborator owning the task collection
//!
//! The controllers that combine these into live state streams live in
//! `taskstream-runtime`.
//!
//! ## Architecture Principles
//!
//! - Unidirectional data flow: repository → controller → view-state
//! - View-states are recomputed, never mutated in place
//! - Pure derivation logic stays here; channels and tasks stay in the runtime
//!
//! ## Example
//!
//! ```
//! use taskstream_core::filter::FilterMode;
//! use taskstream_core::statistics::Statistics;
//! use taskstream_core::task::Task;
//!
//! let tasks = vec![
//!     Task::new("Write report", ""),
//!     Task::new("File taxes", "").set_completed(true),
//! ];
//!
//! let visible = FilterMode::Active.apply(&tasks);
//! assert_eq!(visible.len(), 1);
//!
//! let stats = Statistics::compute(&tasks);
//! assert_eq!(stats.completed_tasks_count, 1);
//! ```

/// Task filtering and display metadata
pub mod filter;
/// One-shot notification and navigation tags
pub mod message;
/// Repository collaborator contract
pub mod repository;
/// Aggregate completion statistics
pub mod statistics;
/// Task entity and identifier
pub mod task;
/// Per-screen view-state snapshots
pub mod view_state;

pub use filter::{EmptyIcon, EmptyLabel, FilterDisplay, FilterLabel, FilterMode};
pub use message::{DetailNavigation, EditResult, ListNavigation, UserMessage};
pub use repository::{RepositoryError, RepositoryFuture, TasksRepository, TasksResult};
pub use statistics::Statistics;
pub use task::{Task, TaskId};
pub use view_state::{DetailViewState, ListViewState, StatisticsViewState};
