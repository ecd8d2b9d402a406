//! Read-only projections over store listings.
//!
//! Sorting and filtering here never touch the database; they take an
//! already-fetched collection and return a rearranged or reduced copy for
//! presentation. Filtering preserves the store's order, and sorting is
//! stable, so re-projecting unchanged data yields an identical sequence.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Feature, Task, TaskPriority};

/// Column a feature listing can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Score,
    Impact,
    Effort,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// Current sort selection for the feature table.
///
/// Selecting the key already in use flips the direction; selecting a
/// different key resets to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub dir: SortDir,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Score,
            dir: SortDir::Desc,
        }
    }
}

impl SortState {
    pub fn new(key: SortKey, dir: SortDir) -> Self {
        Self { key, dir }
    }

    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.dir = match self.dir {
                SortDir::Asc => SortDir::Desc,
                SortDir::Desc => SortDir::Asc,
            };
        } else {
            self.key = key;
            self.dir = SortDir::Desc;
        }
    }
}

/// Sort features by the selected key and direction.
///
/// Numeric keys compare numerically; titles compare case-insensitively.
/// The sort is stable: rows with equal keys keep their input order, so
/// repeated sorts of unchanged data never jitter.
pub fn sorted_features(mut features: Vec<Feature>, state: SortState) -> Vec<Feature> {
    features.sort_by(|a, b| {
        let ord = match state.key {
            SortKey::Score => a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal),
            SortKey::Impact => a.impact.cmp(&b.impact),
            SortKey::Effort => a.effort.cmp(&b.effort),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        match state.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
    features
}

/// Board filters. `None` on either predicate is the pass-through state
/// (the "all" selection in a picker); set predicates are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub assignee: Option<String>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(assignee) = &self.assignee {
            if task.assignee != *assignee {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        true
    }
}

/// Drop tasks that fail the filter, preserving the input order.
pub fn filter_tasks(tasks: Vec<Task>, filter: &TaskFilter) -> Vec<Task> {
    tasks.into_iter().filter(|t| filter.matches(t)).collect()
}
