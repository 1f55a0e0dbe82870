// CurveLens - ui/theme.rs
//
// Colours and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{ContentType, IndexMode};
use egui::Color32;

/// Badge colour for the index mode shown above the table.
pub fn index_mode_colour(mode: IndexMode) -> Color32 {
    match mode {
        IndexMode::Depth => Color32::from_rgb(59, 130, 246), // Blue 500
        IndexMode::Time => Color32::from_rgb(16, 185, 129),  // Emerald 500
    }
}

/// Foreground colour for table text.
pub fn row_text_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(229, 231, 235) // Gray 200
    } else {
        Color32::from_rgb(17, 24, 39) // Gray 900
    }
}

/// Fixed column width per content type, shared by both table renderers so
/// switching renderer never changes the layout of a column.
pub fn column_width(content_type: ContentType) -> f32 {
    match content_type {
        ContentType::String => 130.0,
        ContentType::Number => 100.0,
        ContentType::DateTime => 170.0,
    }
}

/// Status bar colours.
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 260.0;
pub const ROW_HEIGHT: f32 = 20.0;
pub const CHECKBOX_WIDTH: f32 = 24.0;
pub const CONTEXT_MENU_WIDTH: f32 = 200.0;
