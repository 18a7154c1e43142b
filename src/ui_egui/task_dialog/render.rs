use egui::{Color32, RichText};

use crate::models::task::TaskCategory;
use crate::ui_egui::theme::CalendarTheme;

use super::state::{TaskDialogMode, TaskDialogState, TaskDialogSubmission};

const FORM_LABEL_WIDTH: f32 = 90.0;

/// Show the task dialog. Returns the submission once the user confirms;
/// cancelling or closing the window just clears `show_dialog`.
pub fn render_task_dialog(
    ctx: &egui::Context,
    state: &mut TaskDialogState,
    show_dialog: &mut bool,
) -> Option<TaskDialogSubmission> {
    let mut submission = None;
    let mut dialog_open = *show_dialog;

    egui::Window::new(state.title())
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            render_error_banner(ui, state);
            render_range_summary(ui, state);

            let name_label = if state.name.trim().is_empty() {
                RichText::new("Name:").strong().color(Color32::from_rgb(255, 150, 150))
            } else {
                RichText::new("Name:").strong()
            };
            let mut submit_on_enter = false;
            labeled_row(ui, name_label, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.name)
                        .hint_text("Task name")
                        .desired_width(220.0),
                );
                if !state.is_edit() && state.name.is_empty() {
                    response.request_focus();
                }
                submit_on_enter =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            });

            labeled_row(ui, RichText::new("Category:").strong(), |ui| {
                render_category_combo(ui, &mut state.category);
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            if let Some(action) = render_action_buttons(ui, state, show_dialog) {
                submission = Some(action);
            } else if submit_on_enter {
                submission = state.submit();
                if submission.is_some() {
                    *show_dialog = false;
                }
            }
        });

    if !dialog_open {
        *show_dialog = false;
    }

    submission
}

fn render_error_banner(ui: &mut egui::Ui, state: &TaskDialogState) {
    if let Some(ref error) = state.error_message {
        ui.colored_label(Color32::RED, RichText::new(error).strong());
        ui.add_space(6.0);
    }
}

fn render_range_summary(ui: &mut egui::Ui, state: &TaskDialogState) {
    if let TaskDialogMode::Create { start, end } = state.mode {
        let text = if start == end {
            start.format("%a %b %-d, %Y").to_string()
        } else {
            format!("{} to {}", start.format("%a %b %-d"), end.format("%a %b %-d, %Y"))
        };
        labeled_row(ui, RichText::new("Dates:").strong(), |ui| {
            ui.label(text);
        });
    }
}

fn render_category_combo(ui: &mut egui::Ui, category: &mut TaskCategory) {
    egui::ComboBox::from_id_source("task_category_combo")
        .selected_text(category.label())
        .width(220.0)
        .show_ui(ui, |ui| {
            for option in TaskCategory::ALL {
                let swatch = CalendarTheme::hex_to_color(option.color()).unwrap_or(Color32::GRAY);
                ui.selectable_value(
                    category,
                    option,
                    RichText::new(format!("● {}", option.label())).color(swatch),
                );
            }
        });
}

fn render_action_buttons(
    ui: &mut egui::Ui,
    state: &mut TaskDialogState,
    show_dialog: &mut bool,
) -> Option<TaskDialogSubmission> {
    let mut submission = None;

    indented_row(ui, |ui| {
        let label = if state.is_edit() { "Update" } else { "Create" };
        let can_save = !state.name.trim().is_empty();
        let save_button = egui::Button::new(label).fill(if can_save {
            Color32::from_rgb(70, 120, 200)
        } else {
            Color32::from_gray(60)
        });

        ui.add_enabled_ui(can_save, |ui| {
            if ui.add(save_button).clicked() {
                submission = state.submit();
                if submission.is_some() {
                    *show_dialog = false;
                }
            }
        });

        if ui.button("Cancel").clicked() {
            *show_dialog = false;
        }

        if state.is_edit() {
            ui.add_space(20.0);
            if ui
                .button(RichText::new("Delete").color(Color32::RED))
                .clicked()
            {
                submission = state.delete();
                *show_dialog = false;
            }
        }
    });

    ui.add_space(8.0);
    submission
}

fn labeled_row<F>(ui: &mut egui::Ui, label: impl Into<egui::WidgetText>, add_contents: F)
where
    F: FnOnce(&mut egui::Ui),
{
    ui.horizontal(|ui| {
        render_form_label(ui, label);
        add_contents(ui);
    });
}

fn render_form_label(ui: &mut egui::Ui, label: impl Into<egui::WidgetText>) {
    let text = label.into();
    ui.allocate_ui_with_layout(
        egui::Vec2::new(FORM_LABEL_WIDTH, 24.0),
        egui::Layout::right_to_left(egui::Align::Center),
        move |ui| {
            ui.label(text);
        },
    );
}

fn indented_row<F>(ui: &mut egui::Ui, add_contents: F)
where
    F: FnOnce(&mut egui::Ui),
{
    ui.horizontal(|ui| {
        ui.add_space(FORM_LABEL_WIDTH);
        add_contents(ui);
    });
}
