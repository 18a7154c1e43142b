// Task module
// Date-ranged, categorized calendar task

mod serde_date;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque task identifier, generated client-side and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed workflow categories. Each one maps to a single display color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskCategory {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Review")]
    Review,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 4] = [
        TaskCategory::ToDo,
        TaskCategory::InProgress,
        TaskCategory::Review,
        TaskCategory::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::ToDo => "To Do",
            TaskCategory::InProgress => "In Progress",
            TaskCategory::Review => "Review",
            TaskCategory::Completed => "Completed",
        }
    }

    /// Hex color (#RRGGBB) used for bars and indicators
    pub fn color(&self) -> &'static str {
        match self {
            TaskCategory::ToDo => "#3B82F6",
            TaskCategory::InProgress => "#F59E0B",
            TaskCategory::Review => "#8B5CF6",
            TaskCategory::Completed => "#10B981",
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named, categorized task covering an inclusive range of calendar days.
///
/// Serialized with camelCase keys; dates are written as RFC 3339 timestamps
/// at local midnight and accepted back as any RFC 3339 timestamp or a plain
/// `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub category: TaskCategory,
    #[serde(with = "serde_date")]
    pub start_date: NaiveDate,
    #[serde(with = "serde_date")]
    pub end_date: NaiveDate,
    /// Always the category color; kept in the record for readers of the blob
    color: String,
}

impl Task {
    /// Create a task with a fresh id.
    ///
    /// The name is trimmed and must not be empty; the dates may be given in
    /// either order.
    pub fn new(
        name: impl Into<String>,
        category: TaskCategory,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(TaskId::generate(), name, category, start_date, end_date)
    }

    pub fn with_id(
        id: TaskId,
        name: impl Into<String>,
        category: TaskCategory,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, TaskValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TaskValidationError::EmptyName);
        }

        let (start_date, end_date) = ordered(start_date, end_date);
        Ok(Self {
            id,
            name,
            category,
            start_date,
            end_date,
            color: category.color().to_string(),
        })
    }

    /// Hex color of the task's category
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Return a new task with `update` merged over this one.
    ///
    /// The color follows the (possibly new) category, and the range is
    /// reordered if the patch would invert it.
    pub fn merged(&self, update: &TaskUpdate) -> Task {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            next.name = name.clone();
        }
        if let Some(category) = update.category {
            next.category = category;
        }
        if let Some(start) = update.start_date {
            next.start_date = start;
        }
        if let Some(end) = update.end_date {
            next.end_date = end;
        }
        next.normalized()
    }

    /// Re-derive the color and restore `start_date <= end_date`
    pub fn normalized(mut self) -> Task {
        let (start, end) = ordered(self.start_date, self.end_date);
        self.start_date = start;
        self.end_date = end;
        self.color = self.category.color().to_string();
        self
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        if self.start_date > self.end_date {
            return Err(TaskValidationError::InvertedRange);
        }
        Ok(())
    }
}

fn ordered(a: NaiveDate, b: NaiveDate) -> (NaiveDate, NaiveDate) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Partial set of fields merged into an existing task by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub category: Option<TaskCategory>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TaskUpdate {
    /// Change only the date range
    pub fn span(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }

    /// Change only the name and category
    pub fn details(name: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            name: Some(name.into()),
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Validation errors for Task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyName,
    InvertedRange,
}

impl std::fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Task name cannot be empty"),
            Self::InvertedRange => write!(f, "Task start date must not be after its end date"),
        }
    }
}

impl std::error::Error for TaskValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_trims_and_colors() {
        let task = Task::new("  Plan  ", TaskCategory::Review, ymd(2024, 3, 5), ymd(2024, 3, 7)).unwrap();
        assert_eq!(task.name, "Plan");
        assert_eq!(task.color(), "#8B5CF6");
    }

    #[test]
    fn test_new_task_rejects_blank_name() {
        let err = Task::new("   ", TaskCategory::ToDo, ymd(2024, 3, 5), ymd(2024, 3, 5)).unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyName);
    }

    #[test]
    fn test_new_task_orders_dates() {
        let task = Task::new("Swap", TaskCategory::ToDo, ymd(2024, 3, 9), ymd(2024, 3, 2)).unwrap();
        assert_eq!(task.start_date, ymd(2024, 3, 2));
        assert_eq!(task.end_date, ymd(2024, 3, 9));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(TaskId::generate(), TaskId::generate());
    }

    #[test]
    fn test_merge_category_recolors() {
        let task = Task::new("Ship", TaskCategory::ToDo, ymd(2024, 3, 5), ymd(2024, 3, 5)).unwrap();
        let merged = task.merged(&TaskUpdate::details("Ship it", TaskCategory::Completed));
        assert_eq!(merged.id, task.id);
        assert_eq!(merged.name, "Ship it");
        assert_eq!(merged.color(), "#10B981");
        assert_eq!(merged.start_date, task.start_date);
    }

    #[test]
    fn test_merge_span_keeps_details() {
        let task = Task::new("Ship", TaskCategory::InProgress, ymd(2024, 3, 5), ymd(2024, 3, 6)).unwrap();
        let merged = task.merged(&TaskUpdate::span(ymd(2024, 3, 10), ymd(2024, 3, 12)));
        assert_eq!(merged.name, "Ship");
        assert_eq!(merged.category, TaskCategory::InProgress);
        assert_eq!((merged.start_date, merged.end_date), (ymd(2024, 3, 10), ymd(2024, 3, 12)));
    }

    #[test]
    fn test_merge_never_inverts_range() {
        let task = Task::new("Ship", TaskCategory::ToDo, ymd(2024, 3, 5), ymd(2024, 3, 6)).unwrap();
        let update = TaskUpdate {
            start_date: Some(ymd(2024, 3, 20)),
            ..TaskUpdate::default()
        };
        let merged = task.merged(&update);
        assert!(merged.validate().is_ok());
        assert_eq!((merged.start_date, merged.end_date), (ymd(2024, 3, 6), ymd(2024, 3, 20)));
    }

    #[test]
    fn test_category_serialized_names() {
        let json = serde_json::to_string(&TaskCategory::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let parsed: TaskCategory = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(parsed, TaskCategory::ToDo);
    }

    #[test]
    fn test_task_record_roundtrip_keeps_calendar_dates() {
        let task = Task::new("Round", TaskCategory::Review, ymd(2024, 3, 30), ymd(2024, 4, 2)).unwrap();
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"startDate\""));
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn test_task_record_accepts_plain_dates() {
        let json = r##"{"id":"abc","name":"Plain","category":"Completed","startDate":"2024-03-05","endDate":"2024-03-07","color":"#10B981"}"##;
        let parsed: Task = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id.as_str(), "abc");
        assert_eq!(parsed.start_date, ymd(2024, 3, 5));
        assert_eq!(parsed.end_date, ymd(2024, 3, 7));
    }

    #[test]
    fn test_stored_color_follows_category() {
        let json = r##"{"id":"abc","name":"Tinted","category":"To Do","startDate":"2024-03-05","endDate":"2024-03-05","color":"#000000"}"##;
        let parsed: Task = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.normalized().color(), TaskCategory::ToDo.color());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(TaskUpdate::default().is_empty());
        assert!(!TaskUpdate::span(ymd(2024, 1, 1), ymd(2024, 1, 2)).is_empty());
    }
}
