//! Color theme system for the review UI.
//!
//! A `Theme` holds named `ratatui::style::Color` fields for every surface the
//! review screen draws. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors, works on any terminal including 256-color SSH sessions.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;
use tracing::warn;

/// All color values used by the review screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Panel borders
    /// Border color for the file list and active dialogs.
    pub border_active: Color,
    /// Border color for the dimmed file list behind a dialog.
    pub border_inactive: Color,

    // File list
    /// Pending (modified) file entries.
    pub file_pending: Color,
    /// Highlight for the entry under the cursor.
    pub selection: Color,

    // Dialogs and notices
    /// Apply-all confirmation accent.
    pub confirm: Color,
    /// Reject in flight / reject notices.
    pub reject: Color,
    /// Muted hint text.
    pub hint: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator color while browsing.
    pub status_mode_browse: Color,
    /// Mode indicator color while confirming or rejecting.
    pub status_mode_busy: Color,
}

impl Theme {
    /// Built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            file_pending: Color::Yellow,
            selection: Color::Cyan,

            confirm: Color::Green,
            reject: Color::Red,
            hint: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_browse: Color::Cyan,
            status_mode_busy: Color::Yellow,
        }
    }

    /// Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            file_pending: yellow,
            selection: lavender,

            confirm: green,
            reject: red,
            hint: overlay1,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_browse: lavender,
            status_mode_busy: peach,
        }
    }

    /// Resolves a theme name to a built-in theme.
    ///
    /// Unknown names fall back to `dark()` with a logged warning.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}
