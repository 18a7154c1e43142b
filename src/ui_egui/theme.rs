//! Theme module for the egui task calendar
//!
//! Defines the CalendarTheme structure, light/dark presets, and hex color
//! parsing used for category colors.

use egui::Color32;

/// A calendar theme defining all colors used in the application
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Application background color
    pub app_background: Color32,

    /// Calendar grid background color
    pub calendar_background: Color32,

    /// Background for days outside the displayed month
    pub outside_month_background: Color32,

    /// Today's date background color
    pub today_background: Color32,

    /// Today's date border color
    pub today_border: Color32,

    /// Regular day background color
    pub day_background: Color32,

    /// Day cell border color
    pub day_border: Color32,

    /// Weekday header background
    pub header_background: Color32,

    /// Weekday header text
    pub header_text: Color32,

    /// Primary text color (headings, dates)
    pub text_primary: Color32,

    /// Secondary text color (spill-over days, "+N more")
    pub text_secondary: Color32,

    /// Fill for the drag selection preview
    pub selection: Color32,
}

impl CalendarTheme {
    /// Create the default Light theme
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(249, 250, 251),
            calendar_background: Color32::from_rgb(229, 231, 235),
            outside_month_background: Color32::from_rgb(249, 250, 251),
            today_background: Color32::from_rgb(239, 246, 255),
            today_border: Color32::from_rgb(147, 197, 253),
            day_background: Color32::from_rgb(255, 255, 255),
            day_border: Color32::from_rgb(229, 231, 235),
            header_background: Color32::from_rgb(249, 250, 251),
            header_text: Color32::from_rgb(55, 65, 81),
            text_primary: Color32::from_rgb(17, 24, 39),
            text_secondary: Color32::from_rgb(156, 163, 175),
            selection: Color32::from_rgba_unmultiplied(191, 219, 254, 128),
        }
    }

    /// Create the default Dark theme
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            calendar_background: Color32::from_rgb(55, 55, 55),
            outside_month_background: Color32::from_rgb(35, 35, 38),
            today_background: Color32::from_rgb(50, 60, 80),
            today_border: Color32::from_rgb(100, 150, 255),
            day_background: Color32::from_rgb(40, 40, 40),
            day_border: Color32::from_rgb(60, 60, 60),
            header_background: Color32::from_rgb(45, 45, 48),
            header_text: Color32::from_rgb(220, 220, 220),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(140, 140, 140),
            selection: Color32::from_rgba_unmultiplied(59, 130, 246, 90),
        }
    }

    /// Resolve a theme name from settings ("light", "dark" or "system")
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light | dark_light::Mode::Default => Self::light(),
            },
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        // Customize visuals based on our theme
        visuals.window_fill = self.day_background;
        visuals.panel_fill = self.app_background;

        visuals.widgets.noninteractive.bg_fill = self.day_background;
        visuals.widgets.inactive.bg_fill = self.day_background;
        visuals.widgets.hovered.bg_fill = self.today_background;
        visuals.widgets.active.bg_fill = self.today_background;

        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }

    /// Parse hex string to Color32
    pub fn hex_to_color(hex: &str) -> Result<Color32, String> {
        let hex = hex.trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return Err("Hex color must be 6 characters".to_string());
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid hex color")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid hex color")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid hex color")?;

        Ok(Color32::from_rgb(r, g, b))
    }
}
