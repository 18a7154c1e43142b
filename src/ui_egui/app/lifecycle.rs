use super::state::AppState;
use super::CalendarApp;
use crate::models::settings::Settings;
use crate::services::settings::SettingsService;
use crate::services::storage::FileBlobStore;
use crate::services::task::TaskStore;
use crate::ui_egui::theme::CalendarTheme;

impl CalendarApp {
    /// Build the app from settings loaded before the window opened
    pub fn with_settings(
        ctx: &egui::Context,
        settings_service: SettingsService,
        settings: Settings,
    ) -> Self {
        let today = Self::today();
        let mut state = AppState::new(open_task_store(&settings), today);
        if settings.seed_demo_data {
            state.seed_demo_if_empty(today);
        }

        let active_theme = CalendarTheme::from_name(&settings.theme);
        active_theme.apply_to_context(ctx);
        log::info!(
            "Calendar ready with {} tasks ({} theme)",
            state.store.len(),
            if active_theme.is_dark { "dark" } else { "light" }
        );

        Self {
            settings,
            settings_service,
            active_theme,
            state,
        }
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Render sidebar (before CentralPanel so it takes left space)
        self.render_sidebar(ctx);
        self.render_main_panel(ctx);
        self.render_task_dialog(ctx);
    }
}

fn open_task_store(settings: &Settings) -> TaskStore {
    let dir = settings
        .data_dir
        .clone()
        .unwrap_or_else(FileBlobStore::default_dir);
    log::info!("Storing tasks in {}", dir.display());
    TaskStore::load_with_key(Box::new(FileBlobStore::new(dir)), settings.storage_key.clone())
}
