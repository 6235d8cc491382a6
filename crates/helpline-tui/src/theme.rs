//! Catppuccin Mocha color palette for the TUI.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Sender accents
    pub user: Color,
    pub assistant: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            surface: Color::Rgb(49, 50, 68),    // #313244
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086
            user: Color::Rgb(137, 180, 250),    // #89b4fa (blue)
            assistant: Color::Rgb(148, 226, 213), // #94e2d5 (teal)
            border: Color::Rgb(69, 71, 90),     // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }
}
