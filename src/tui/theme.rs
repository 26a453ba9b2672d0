//! Centralized Slate & Amber color theme for the stockdesk TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Slate blue — primary accent, focused borders, active fields.
pub const PRIMARY: Color = Color::Rgb(0x5C, 0x7C, 0xA3);
/// Light slate — highlights, hints.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x8F, 0xAA, 0xC8);

/// Amber — accent, the armed product, totals emphasis.
pub const ACCENT: Color = Color::Rgb(0xE8, 0xA8, 0x3C);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Muted text — secondary labels, borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
/// Dim text — disabled items, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error — failed submissions, unknown identifiers.
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
/// Success — recorded movements.
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
/// Warning — permission refusals, advisory stock blocks.
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
/// Info — loading hints.
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Key-hint styling in the status bar.
pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

/// Badge for the app name in the status bar.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Highlighted row / suggestion under the cursor.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}
