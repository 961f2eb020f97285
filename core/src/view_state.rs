//! View-state snapshots for the task screens.
//!
//! A view-state is an immutable snapshot of everything a presentation layer
//! needs to render one screen. Controllers construct a fresh value on every
//! upstream change and publish it through a watch channel; view-states are
//! never mutated in place.

use crate::filter::{EmptyIcon, EmptyLabel, FilterDisplay, FilterLabel, FilterMode};
use crate::task::Task;
use serde::{Deserialize, Serialize};

/// View-state for the task list screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListViewState {
    /// Visible tasks after filtering, in repository order
    pub items: Vec<Task>,
    /// Whether a forced refresh is in flight
    pub is_loading: bool,
    /// Heading label for the current filter
    pub filter_label: FilterLabel,
    /// Label shown when `items` is empty
    pub empty_label: EmptyLabel,
    /// Icon shown when `items` is empty
    pub empty_icon: EmptyIcon,
    /// Whether the "add task" affordance is visible
    pub add_visible: bool,
}

impl ListViewState {
    /// Builds a state snapshot from filtered items, the current display row,
    /// and the latest loading flag.
    #[must_use]
    pub const fn derived(items: Vec<Task>, display: FilterDisplay, is_loading: bool) -> Self {
        Self {
            items,
            is_loading,
            filter_label: display.filter_label,
            empty_label: display.empty_label,
            empty_icon: display.empty_icon,
            add_visible: display.add_visible,
        }
    }
}

impl Default for ListViewState {
    fn default() -> Self {
        Self::derived(Vec::new(), FilterMode::All.display(), false)
    }
}

/// View-state for the task detail screen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailViewState {
    /// The tracked task, when loaded
    pub task: Option<Task>,
    /// Whether a refresh of the tracked task is in flight
    pub is_loading: bool,
    /// Completion flag of the loaded task (false when no task is loaded)
    pub is_task_completed: bool,
}

impl DetailViewState {
    /// Builds a state snapshot from an optional task and the loading flag.
    #[must_use]
    pub fn derived(task: Option<Task>, is_loading: bool) -> Self {
        let is_task_completed = task.as_ref().is_some_and(Task::is_completed);
        Self {
            task,
            is_loading,
            is_task_completed,
        }
    }
}

/// View-state for the statistics screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsViewState {
    /// Whether a forced refresh is in flight
    pub is_loading: bool,
    /// Percentage of active tasks, in `[0, 100]`
    pub active_tasks_percent: f64,
    /// Percentage of completed tasks, in `[0, 100]`
    pub completed_tasks_percent: f64,
    /// Whether there are no tasks to summarize
    pub is_empty: bool,
    /// Whether the last observation was an error
    pub is_error: bool,
}
