pub mod month_view;
mod palette;
pub mod task_bar;
