mod lifecycle;
mod sidebar;
mod state;

use self::state::AppState;
use crate::models::settings::Settings;
use crate::services::settings::SettingsService;
use crate::ui_egui::task_dialog::render_task_dialog;
use crate::ui_egui::theme::CalendarTheme;
use crate::ui_egui::views::month_view::MonthView;
use chrono::{Local, NaiveDate};
use egui::{Color32, RichText};

pub struct CalendarApp {
    /// Settings loaded at startup, saved back when the user changes them
    settings: Settings,
    settings_service: SettingsService,
    /// Currently applied theme colors
    active_theme: CalendarTheme,
    /// Task store, filters, drag session and dialog state
    state: AppState,
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }
}

impl CalendarApp {
    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn render_main_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_month_header(ui);
            ui.add_space(6.0);

            let today = Self::today();
            let Some(grid) = self.state.month_grid() else {
                ui.label("This month cannot be displayed.");
                return;
            };
            let tasks = self.state.visible_tasks(today);

            let result = MonthView::show(
                ui,
                &grid,
                &tasks,
                &self.state.session,
                &self.active_theme,
                self.settings.max_day_indicators,
                today,
            );

            // Pointer input is ignored while the dialog is up
            if self.state.task_dialog.is_some() {
                return;
            }
            for event in result.pointer_events {
                self.state.handle_pointer_event(event);
            }
            if let Some(task_id) = result.edit_request {
                self.state.open_task_editor(&task_id);
            }
        });
    }

    fn render_month_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("◀").on_hover_text("Previous month").clicked() {
                self.state.navigate_month(-1);
            }
            if ui.button("Today").clicked() {
                self.state.go_to_today(Self::today());
            }
            if ui.button("▶").on_hover_text("Next month").clicked() {
                self.state.navigate_month(1);
            }

            ui.add_space(12.0);
            ui.heading(self.state.current_month.format("%B %Y").to_string());

            if let Some(ref error) = self.state.storage_error {
                ui.add_space(12.0);
                ui.colored_label(Color32::RED, RichText::new(format!("Not saved: {}", error)));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut show_sidebar = self.settings.show_sidebar;
                if ui.toggle_value(&mut show_sidebar, "Filters").clicked() {
                    self.toggle_sidebar();
                }
            });
        });
    }

    fn render_task_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.state.task_dialog.as_mut() else {
            return;
        };

        let mut show_dialog = true;
        let submission = render_task_dialog(ctx, dialog, &mut show_dialog);

        if !show_dialog {
            self.state.task_dialog = None;
        }
        if let Some(submission) = submission {
            self.state.apply_submission(submission);
        }
    }
}
