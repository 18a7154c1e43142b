mod app;
pub mod drag;
mod task_dialog;
pub mod theme;
pub mod views;

pub use app::CalendarApp;
pub use task_dialog::{TaskDialogMode, TaskDialogState, TaskDialogSubmission};
