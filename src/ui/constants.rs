//! UI constants for layout, colors, text and animation timing

use std::time::Duration;

use egui::Color32;

/// Status window
pub const APP_ID: &str = "eyecare";
pub const WINDOW_TITLE: &str = "Eye Care - 20-20-20 Rule";
pub const WINDOW_WIDTH: f32 = 300.0;
pub const WINDOW_HEIGHT: f32 = 150.0;
pub const STATUS_FONT_SIZE: f32 = 12.0;
pub const SECTION_SPACING: f32 = 10.0;

/// Break overlay
pub const OVERLAY_TITLE: &str = "Eye Care Break";
pub const OVERLAY_VIEWPORT: &str = "break_overlay";
pub const BREAK_MESSAGE: &str = "Look 20 feet away for 20 seconds 🙂🙂";
pub const MESSAGE_FONT_SIZE: f32 = 36.0;
pub const EMOJI_FONT_SIZE: f32 = 72.0;
pub const COUNTDOWN_FONT_SIZE: f32 = 24.0;

/// Black at 80% opacity
pub const OVERLAY_BACKGROUND: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 204);
pub const OVERLAY_FOREGROUND: Color32 = Color32::WHITE;

/// Emoji animation
pub const EMOJI_FRAME_INTERVAL: Duration = Duration::from_millis(300);
pub const EMOJI_GLYPHS: &[&str] = &[
    "🙂", "😊", "😄", "😃", "🤩", "😁", "😆", "😍", "🥳", "🤗",
];
