//! Task filtering and per-filter display metadata.
//!
//! A [`FilterMode`] is a pure selector over the task collection. Applying it
//! never reorders tasks; the output is always an order-preserving subsequence
//! of the input. Each mode also carries a static row of display metadata
//! ([`FilterDisplay`]) that the presentation layer maps to concrete strings
//! and icons.

use crate::task::Task;
use serde::{Deserialize, Serialize};

/// Named subset selector over the task collection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    /// Show every task.
    #[default]
    All,
    /// Show only tasks that are not yet completed.
    Active,
    /// Show only completed tasks.
    Completed,
}

/// Label tag for the current filter heading.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterLabel {
    /// "All tasks"
    All,
    /// "Active tasks"
    Active,
    /// "Completed tasks"
    Completed,
}

/// Label tag shown when the filtered list is empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyLabel {
    /// "You have no tasks!"
    NoTasksAll,
    /// "You have no active tasks!"
    NoTasksActive,
    /// "You have no completed tasks!"
    NoTasksCompleted,
}

/// Icon tag shown alongside the empty-list label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyIcon {
    /// Application logo outline
    Logo,
    /// Check-circle glyph
    CheckCircle,
    /// Verified-user glyph
    VerifiedUser,
}

/// Static display metadata for one filter mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDisplay {
    /// Heading label for the current filter
    pub filter_label: FilterLabel,
    /// Label shown when the filtered list is empty
    pub empty_label: EmptyLabel,
    /// Icon shown when the filtered list is empty
    pub empty_icon: EmptyIcon,
    /// Whether the "add task" affordance is visible
    pub add_visible: bool,
}

impl FilterMode {
    /// Selects the visible subset of `tasks` for this mode.
    ///
    /// Stable: input order is preserved and tasks are never duplicated.
    #[must_use]
    pub fn apply(self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| match self {
                Self::All => true,
                Self::Active => task.is_active(),
                Self::Completed => task.is_completed(),
            })
            .cloned()
            .collect()
    }

    /// Returns the static display row for this mode.
    ///
    /// `add_visible` is true only for [`FilterMode::All`].
    #[must_use]
    pub const fn display(self) -> FilterDisplay {
        match self {
            Self::All => FilterDisplay {
                filter_label: FilterLabel::All,
                empty_label: EmptyLabel::NoTasksAll,
                empty_icon: EmptyIcon::Logo,
                add_visible: true,
            },
            Self::Active => FilterDisplay {
                filter_label: FilterLabel::Active,
                empty_label: EmptyLabel::NoTasksActive,
                empty_icon: EmptyIcon::CheckCircle,
                add_visible: false,
            },
            Self::Completed => FilterDisplay {
                filter_label: FilterLabel::Completed,
                empty_label: EmptyLabel::NoTasksCompleted,
                empty_icon: EmptyIcon::VerifiedUser,
                add_visible: false,
            },
        }
    }
}
