//! Color constants for the app chrome.

use eframe::egui::Color32;

/// Accent for titles, links, and primary buttons - Indigo
pub const ACCENT: Color32 = Color32::from_rgb(0x66, 0x7E, 0xEA);

/// Error text - Red
pub const ERROR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

/// Destructive button background - Red
pub const DANGER: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

/// Byline and timestamp text - Gray
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);

/// Author name highlight
pub const AUTHOR: Color32 = Color32::from_rgb(0x66, 0x7E, 0xEA);

/// Success/confirmation text - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
