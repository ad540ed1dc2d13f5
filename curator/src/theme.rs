//! Color theme system for curator.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface the client renders. Two built-in themes:
//!
//! - `dark` — ANSI 16 colors, works on any terminal including 256-color
//!   SSH sessions with no truecolor support.
//! - `catppuccin-mocha` — Catppuccin Mocha palette in RGB; needs truecolor.

use ratatui::style::Color;

/// All color values used across curator's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Review panel
    /// Added lines and added diff entries.
    pub diff_added: Color,
    /// Removed lines and removed diff entries.
    pub diff_removed: Color,
    /// Unchanged context lines.
    pub diff_context: Color,
    /// Entry header lines (`[x] #3 MODIFIED`).
    pub diff_entry_header: Color,

    // PR status badges
    pub status_open: Color,
    pub status_merged: Color,
    pub status_rejected: Color,

    // Toasts
    pub toast_success: Color,
    pub toast_error: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Tab indicator and general accent (selected rows, counts).
    pub accent: Color,
    /// Secondary text: timestamps, paths, hints.
    pub dim: Color,
}

impl Theme {
    /// Built-in dark theme using ANSI 16 colors. Safe default when color
    /// capability is unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_context: Color::Reset,
            diff_entry_header: Color::Cyan,

            status_open: Color::Green,
            status_merged: Color::Magenta,
            status_rejected: Color::Red,

            toast_success: Color::Green,
            toast_error: Color::Red,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            accent: Color::Cyan,
            dim: Color::DarkGray,
        }
    }

    /// Catppuccin Mocha theme in RGB truecolor. Colors degrade to the
    /// nearest ANSI approximation on non-truecolor terminals.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let teal = Color::Rgb(148, 226, 213); // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            diff_added: green,
            diff_removed: red,
            diff_context: text,
            diff_entry_header: teal,

            status_open: green,
            status_merged: mauve,
            status_rejected: red,

            toast_success: green,
            toast_error: red,

            status_bar_bg: surface1,
            status_bar_fg: text,
            accent: lavender,
            dim: overlay1,
        }
    }

    /// Resolves a theme name from config to a built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo never prevents
    /// startup; the fallback is noted on stderr.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                eprintln!("curator: unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }
}
