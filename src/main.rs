// Task Calendar Application
// Main entry point

use task_calendar::services::settings::SettingsService;
use task_calendar::ui_egui::CalendarApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Task Calendar");

    let settings_service = SettingsService::default_location();
    let settings = settings_service.get_or_default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Task Calendar")
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Task Calendar",
        options,
        Box::new(move |cc| {
            Ok(Box::new(CalendarApp::with_settings(
                &cc.egui_ctx,
                settings_service,
                settings,
            )))
        }),
    )
}
