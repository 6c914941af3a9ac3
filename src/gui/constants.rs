//! GUI-specific constants for layout and status colors

use egui;

/// Editor window dimensions
pub const WINDOW_WIDTH: f32 = 1100.0;
pub const WINDOW_HEIGHT: f32 = 900.0;
pub const WINDOW_MIN_WIDTH: f32 = 760.0;
pub const WINDOW_MIN_HEIGHT: f32 = 600.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const SIDEBAR_WIDTH: f32 = 260.0;

/// Args table column widths
pub const ARG_NAME_WIDTH: f32 = 140.0;
pub const ARG_VALUE_WIDTH: f32 = 220.0;

/// Text areas
pub const OVERRIDE_ROWS: usize = 8;
pub const PREVIEW_MAX_HEIGHT: f32 = 420.0;

/// Status colors
pub const STATUS_SUCCESS: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const STATUS_WARNING: egui::Color32 = egui::Color32::from_rgb(200, 200, 0);
pub const STATUS_INFO: egui::Color32 = egui::Color32::from_rgb(90, 160, 230);
