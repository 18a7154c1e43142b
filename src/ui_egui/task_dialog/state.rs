use chrono::NaiveDate;

use crate::models::task::{Task, TaskCategory, TaskId, TaskUpdate};

/// Whether the dialog creates a new task or edits an existing one
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskDialogMode {
    Create { start: NaiveDate, end: NaiveDate },
    Edit { task_id: TaskId },
}

/// What the dialog asks the application to do when it closes
#[derive(Clone, Debug, PartialEq)]
pub enum TaskDialogSubmission {
    Create(Task),
    Update(TaskId, TaskUpdate),
    Delete(TaskId),
}

/// State for the task editing dialog
#[derive(Clone, Debug)]
pub struct TaskDialogState {
    pub mode: TaskDialogMode,
    pub name: String,
    pub category: TaskCategory,
    pub error_message: Option<String>,
}

impl TaskDialogState {
    /// Blank form over a selected date range
    pub fn new_task(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            mode: TaskDialogMode::Create { start, end },
            name: String::new(),
            category: TaskCategory::default(),
            error_message: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            mode: TaskDialogMode::Edit {
                task_id: task.id.clone(),
            },
            name: task.name.clone(),
            category: task.category,
            error_message: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, TaskDialogMode::Edit { .. })
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            TaskDialogMode::Create { .. } => "Create New Task",
            TaskDialogMode::Edit { .. } => "Edit Task",
        }
    }

    /// Validate the form and build the change it describes.
    ///
    /// Returns `None` and sets `error_message` when the name is blank.
    pub fn submit(&mut self) -> Option<TaskDialogSubmission> {
        let name = self.name.trim();
        if name.is_empty() {
            self.error_message = Some("Task name is required".to_string());
            return None;
        }
        self.error_message = None;

        match &self.mode {
            TaskDialogMode::Create { start, end } => {
                match Task::new(name, self.category, *start, *end) {
                    Ok(task) => Some(TaskDialogSubmission::Create(task)),
                    Err(e) => {
                        self.error_message = Some(e.to_string());
                        None
                    }
                }
            }
            TaskDialogMode::Edit { task_id } => Some(TaskDialogSubmission::Update(
                task_id.clone(),
                TaskUpdate::details(name, self.category),
            )),
        }
    }

    /// Delete request for the task being edited; `None` in create mode
    pub fn delete(&self) -> Option<TaskDialogSubmission> {
        match &self.mode {
            TaskDialogMode::Edit { task_id } => Some(TaskDialogSubmission::Delete(task_id.clone())),
            TaskDialogMode::Create { .. } => None,
        }
    }
}
