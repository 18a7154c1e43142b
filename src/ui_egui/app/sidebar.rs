//! Sidebar with the task filters.

use super::CalendarApp;
use crate::models::filter::TimeFilter;
use crate::models::task::TaskCategory;
use crate::ui_egui::theme::CalendarTheme;
use egui::{Color32, RichText};

const SIDEBAR_MIN_WIDTH: f32 = 180.0;
const SIDEBAR_DEFAULT_WIDTH: f32 = 220.0;
const SIDEBAR_MAX_WIDTH: f32 = 320.0;

impl CalendarApp {
    pub(super) fn render_sidebar(&mut self, ctx: &egui::Context) {
        if !self.settings.show_sidebar {
            return;
        }

        egui::SidePanel::left("sidebar")
            .default_width(SIDEBAR_DEFAULT_WIDTH)
            .min_width(SIDEBAR_MIN_WIDTH)
            .max_width(SIDEBAR_MAX_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Filters");
                ui.add_space(8.0);
                self.render_search(ui);
                ui.add_space(8.0);
                ui.separator();
                self.render_category_filters(ui);
                ui.add_space(8.0);
                ui.separator();
                self.render_time_filters(ui);
                ui.add_space(12.0);

                let criteria = &mut self.state.criteria;
                ui.add_enabled_ui(!criteria.is_unrestricted(), |ui| {
                    if ui.button("Clear filters").clicked() {
                        criteria.clear();
                    }
                });
            });
    }

    fn render_search(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Search").strong());
        ui.add(
            egui::TextEdit::singleline(&mut self.state.criteria.search_term)
                .hint_text("Task name")
                .desired_width(f32::INFINITY),
        );
    }

    fn render_category_filters(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Categories").strong());
        for category in TaskCategory::ALL {
            let mut selected = self.state.criteria.categories.contains(&category);
            let color = CalendarTheme::hex_to_color(category.color()).unwrap_or(Color32::GRAY);
            ui.horizontal(|ui| {
                if ui.checkbox(&mut selected, "").changed() {
                    self.state.criteria.set_category(category, selected);
                }
                ui.label(RichText::new("●").color(color));
                ui.label(category.label());
            });
        }
    }

    fn render_time_filters(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Time").strong());
        let time_filter = &mut self.state.criteria.time_filter;
        ui.radio_value(time_filter, None, "All time");
        for filter in TimeFilter::ALL {
            ui.radio_value(time_filter, Some(filter), filter.label());
        }
    }

    /// Toggle sidebar visibility
    pub(super) fn toggle_sidebar(&mut self) {
        self.settings.show_sidebar = !self.settings.show_sidebar;
        self.save_settings();
    }

    fn save_settings(&self) {
        if let Err(err) = self.settings_service.update(&self.settings) {
            log::error!("Failed to save settings: {:#}", err);
        }
    }
}
