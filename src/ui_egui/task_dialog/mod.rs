mod render;
mod state;

pub use render::render_task_dialog;
pub use state::{TaskDialogMode, TaskDialogState, TaskDialogSubmission};
