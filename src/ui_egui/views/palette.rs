use crate::models::task::Task;
use crate::ui_egui::theme::CalendarTheme;
use egui::Color32;

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Bar color for a task, taken from its category
pub(crate) fn task_color(task: &Task) -> Color32 {
    CalendarTheme::hex_to_color(task.category.color()).unwrap_or(Color32::from_rgb(100, 150, 200))
}

#[derive(Clone, Copy)]
pub(crate) struct CalendarCellPalette {
    pub grid_bg: Color32,
    pub regular_bg: Color32,
    pub outside_bg: Color32,
    pub today_bg: Color32,
    pub today_border: Color32,
    pub text: Color32,
    pub muted_text: Color32,
    pub hover_border: Color32,
    pub selection: Color32,
    pub header_bg: Color32,
    pub header_text: Color32,
}

impl CalendarCellPalette {
    pub fn from_theme(theme: &CalendarTheme) -> Self {
        Self {
            grid_bg: theme.calendar_background,
            regular_bg: theme.day_background,
            outside_bg: theme.outside_month_background,
            today_bg: theme.today_background,
            today_border: theme.today_border,
            text: theme.text_primary,
            muted_text: theme.text_secondary,
            hover_border: with_alpha(theme.today_border, if theme.is_dark { 160 } else { 120 }),
            selection: theme.selection,
            header_bg: theme.header_background,
            header_text: theme.header_text,
        }
    }
}
