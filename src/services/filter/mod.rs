//! Derives the visible task subset from the full list and filter criteria.

use chrono::{Duration, NaiveDate};

use crate::models::filter::FilterCriteria;
use crate::models::task::Task;
use crate::utils::date::date_interval_contains;

/// Tasks passing every active filter axis, in input order.
///
/// Axes are applied as search text, then categories, then the time window.
/// The time window keeps tasks whose start date lies in
/// `[today, today + N weeks]`, both ends included.
pub fn visible_tasks(tasks: &[Task], criteria: &FilterCriteria, today: NaiveDate) -> Vec<Task> {
    let search = criteria.normalized_search();
    let window_end = criteria
        .time_filter
        .map(|filter| today + Duration::weeks(filter.weeks()));

    tasks
        .iter()
        .filter(|task| match &search {
            Some(term) => task.name.to_lowercase().contains(term.as_str()),
            None => true,
        })
        .filter(|task| criteria.categories.is_empty() || criteria.categories.contains(&task.category))
        .filter(|task| match window_end {
            Some(end) => date_interval_contains(task.start_date, today, end),
            None => true,
        })
        .cloned()
        .collect()
}

/// Tasks whose inclusive range covers `date`
pub fn tasks_for_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| date_interval_contains(date, task.start_date, task.end_date))
        .collect()
}
