// Test fixtures - reusable test data
// Provides consistent dates and tasks across all test files

#![allow(dead_code)]

use chrono::NaiveDate;
use task_calendar::models::task::{Task, TaskCategory, TaskId};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Friday, March 1, 2024 (leap year; the grid starts on Feb 25)
    pub fn march_1_2024() -> NaiveDate {
        ymd(2024, 3, 1)
    }

    /// Returns Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }
}

/// Sample tasks for testing
pub mod tasks {
    use super::dates::ymd;
    use super::*;

    /// Three-day task inside one week row of March 2024
    pub fn sprint() -> Task {
        Task::with_id(
            TaskId::from("sprint"),
            "Sprint",
            TaskCategory::InProgress,
            ymd(2024, 3, 5),
            ymd(2024, 3, 7),
        )
        .unwrap()
    }

    /// Saturday to Tuesday, crossing a week boundary
    pub fn weekend_migration() -> Task {
        Task::with_id(
            TaskId::from("migration"),
            "Weekend migration",
            TaskCategory::ToDo,
            ymd(2024, 3, 9),
            ymd(2024, 3, 12),
        )
        .unwrap()
    }

    pub fn release_review() -> Task {
        Task::with_id(
            TaskId::from("review"),
            "Release review",
            TaskCategory::Review,
            ymd(2024, 3, 20),
            ymd(2024, 3, 20),
        )
        .unwrap()
    }

    pub fn all() -> Vec<Task> {
        vec![sprint(), weekend_migration(), release_review()]
    }
}
