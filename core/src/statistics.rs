//! Aggregate completion statistics over a task list.

use crate::task::Task;
use serde::{Deserialize, Serialize};

/// Aggregate completion statistics.
///
/// Invariants (when `is_empty` is false):
/// - `active_tasks_percent + completed_tasks_percent == 100` within floating
///   tolerance
/// - `active_tasks_count + completed_tasks_count` equals the input length
///
/// When `is_empty` is true every numeric field is zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Percentage of active tasks, in `[0, 100]`
    pub active_tasks_percent: f64,
    /// Percentage of completed tasks, in `[0, 100]`
    pub completed_tasks_percent: f64,
    /// Number of active tasks
    pub active_tasks_count: usize,
    /// Number of completed tasks
    pub completed_tasks_count: usize,
    /// Whether the input task list was empty
    pub is_empty: bool,
}

impl Statistics {
    /// Computes statistics for a task list.
    ///
    /// Pure and deterministic; no rounding is applied to the percentages.
    #[must_use]
    pub fn compute(tasks: &[Task]) -> Self {
        if tasks.is_empty() {
            return Self {
                is_empty: true,
                ..Self::default()
            };
        }

        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        let active = total - completed;

        // Queue sizes here are task-list lengths, far below f64 precision limits.
        #[allow(clippy::cast_precision_loss)]
        Self {
            active_tasks_percent: active as f64 / total as f64 * 100.0,
            completed_tasks_percent: completed as f64 / total as f64 * 100.0,
            active_tasks_count: active,
            completed_tasks_count: completed,
            is_empty: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn task(completed: bool) -> Task {
        Task::new("t", "").set_completed(completed)
    }

    #[test]
    fn empty_list_is_all_zero() {
        let stats = Statistics::compute(&[]);
        assert_eq!(
            stats,
            Statistics {
                active_tasks_percent: 0.0,
                completed_tasks_percent: 0.0,
                active_tasks_count: 0,
                completed_tasks_count: 0,
                is_empty: true,
            }
        );
    }

    #[test]
    fn one_active_two_completed() {
        let tasks = vec![task(false), task(true), task(true)];
        let stats = Statistics::compute(&tasks);

        assert!(!stats.is_empty);
        assert_eq!(stats.active_tasks_count, 1);
        assert_eq!(stats.completed_tasks_count, 2);
        assert!((stats.active_tasks_percent - 100.0 / 3.0).abs() < 1e-9);
        assert!((stats.completed_tasks_percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn only_active_tasks_is_hundred_percent_active() {
        let stats = Statistics::compute(&[task(false)]);
        assert!(!stats.is_empty);
        assert!((stats.active_tasks_percent - 100.0).abs() < f64::EPSILON);
        assert!(stats.completed_tasks_percent.abs() < f64::EPSILON);
        assert_eq!(stats.active_tasks_count, 1);
        assert_eq!(stats.completed_tasks_count, 0);
    }

    #[test]
    fn only_completed_tasks_is_hundred_percent_completed() {
        let stats = Statistics::compute(&[task(true)]);
        assert!(!stats.is_empty);
        assert!(stats.active_tasks_percent.abs() < f64::EPSILON);
        assert!((stats.completed_tasks_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn three_active_two_completed_ratio() {
        let tasks = vec![task(false), task(false), task(false), task(true), task(true)];
        let stats = Statistics::compute(&tasks);
        assert!((stats.active_tasks_percent - 60.0).abs() < f64::EPSILON);
        assert!((stats.completed_tasks_percent - 40.0).abs() < f64::EPSILON);
        assert_eq!(stats.active_tasks_count, 3);
        assert_eq!(stats.completed_tasks_count, 2);
    }

    proptest! {
        #[test]
        fn percents_sum_to_hundred_unless_empty(flags in prop::collection::vec(any::<bool>(), 0..64)) {
            let tasks: Vec<Task> = flags.into_iter().map(task).collect();
            let stats = Statistics::compute(&tasks);

            if tasks.is_empty() {
                prop_assert!(stats.is_empty);
                prop_assert!(stats.active_tasks_percent.abs() < f64::EPSILON);
                prop_assert!(stats.completed_tasks_percent.abs() < f64::EPSILON);
            } else {
                prop_assert!(!stats.is_empty);
                let sum = stats.active_tasks_percent + stats.completed_tasks_percent;
                prop_assert!((sum - 100.0).abs() < 1e-9);
                prop_assert_eq!(
                    stats.active_tasks_count + stats.completed_tasks_count,
                    tasks.len()
                );
            }
        }
    }
}
