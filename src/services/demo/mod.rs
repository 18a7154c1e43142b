// Demo data module
// Sample tasks placed relative to a given day

use chrono::{Duration, NaiveDate};

use crate::models::task::{Task, TaskCategory};

/// Sample tasks spread over the days following `today`
pub fn sample_tasks(today: NaiveDate) -> Vec<Task> {
    let samples = [
        ("Project Planning", TaskCategory::ToDo, 2, 4),
        ("Code Review", TaskCategory::Review, 5, 7),
        ("Bug Fixes", TaskCategory::InProgress, 1, 3),
        ("Documentation", TaskCategory::Completed, -3, -1),
        ("Testing", TaskCategory::ToDo, 8, 10),
    ];

    samples
        .iter()
        .filter_map(|(name, category, start, end)| {
            let start_date = today + Duration::days(*start);
            let end_date = today + Duration::days(*end);
            Task::new(*name, *category, start_date, end_date).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_samples_are_valid_and_unique() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let tasks = sample_tasks(today);
        assert_eq!(tasks.len(), 5);

        let ids: HashSet<_> = tasks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), tasks.len());

        for task in &tasks {
            assert!(task.validate().is_ok());
            assert_eq!(task.color(), task.category.color());
        }
    }

    #[test]
    fn test_samples_cover_every_category() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let categories: HashSet<_> = sample_tasks(today).iter().map(|t| t.category).collect();
        assert_eq!(categories.len(), TaskCategory::ALL.len());
    }
}
