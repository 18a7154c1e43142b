//! Filter criteria applied to the task list.
//!
//! The three axes (search text, categories, time window) combine with AND
//! semantics; an empty axis places no restriction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::task::TaskCategory;

/// Look-ahead window for task start dates, measured from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFilter {
    #[serde(rename = "1week")]
    OneWeek,
    #[serde(rename = "2weeks")]
    TwoWeeks,
    #[serde(rename = "3weeks")]
    ThreeWeeks,
}

impl TimeFilter {
    pub const ALL: [TimeFilter; 3] = [
        TimeFilter::OneWeek,
        TimeFilter::TwoWeeks,
        TimeFilter::ThreeWeeks,
    ];

    pub fn weeks(&self) -> i64 {
        match self {
            TimeFilter::OneWeek => 1,
            TimeFilter::TwoWeeks => 2,
            TimeFilter::ThreeWeeks => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeFilter::OneWeek => "Tasks within 1 week",
            TimeFilter::TwoWeeks => "Tasks within 2 weeks",
            TimeFilter::ThreeWeeks => "Tasks within 3 weeks",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub categories: BTreeSet<TaskCategory>,
    pub time_filter: Option<TimeFilter>,
    pub search_term: String,
}

impl FilterCriteria {
    /// Add or remove a category from the selection
    pub fn set_category(&mut self, category: TaskCategory, selected: bool) {
        if selected {
            self.categories.insert(category);
        } else {
            self.categories.remove(&category);
        }
    }

    /// Trimmed, lower-cased search term; `None` when there is nothing to match
    pub fn normalized_search(&self) -> Option<String> {
        let term = self.search_term.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    /// True when no axis restricts the task list
    pub fn is_unrestricted(&self) -> bool {
        self.normalized_search().is_none()
            && self.categories.is_empty()
            && self.time_filter.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
