//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand colors
    pub primary: Color,
    pub accent: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Backgrounds
    pub bg_dark: Color,
    pub bg_highlight: Color,

    // Text
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,
}

/// Available theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Default,
    Periodic,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Default => "default",
            ThemeName::Periodic => "periodic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Default => "Default",
            ThemeName::Periodic => "Periodic",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "periodic" => ThemeName::Periodic,
            _ => ThemeName::Default,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Default => ThemeName::Periodic,
            ThemeName::Periodic => ThemeName::Default,
        }
    }
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let colors = match name {
            ThemeName::Default => Self::default_colors(),
            ThemeName::Periodic => Self::periodic_colors(),
        };
        Self { name, colors }
    }

    pub fn from_name(name: &str) -> Self {
        Self::new(ThemeName::from_str(name))
    }

    fn default_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(99, 102, 241),     // Indigo
            accent: Color::Rgb(236, 72, 153),      // Pink

            success: Color::Rgb(34, 197, 94),      // Green
            warning: Color::Rgb(250, 204, 21),     // Yellow
            error: Color::Rgb(239, 68, 68),        // Red

            bg_dark: Color::Rgb(15, 23, 42),       // Slate 900
            bg_highlight: Color::Rgb(71, 85, 105), // Slate 600

            text: Color::Rgb(248, 250, 252),       // Slate 50
            text_muted: Color::Rgb(148, 163, 184), // Slate 400
            text_dim: Color::Rgb(100, 116, 139),   // Slate 500
        }
    }

    /// Periodic theme - lab-bench greens and coppers.
    fn periodic_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(0x2D, 0xD4, 0xBF),      // Teal
            accent: Color::Rgb(0xF5, 0x9E, 0x0B),       // Amber

            success: Color::Rgb(0x84, 0xCC, 0x16),      // Lime
            warning: Color::Rgb(0xEA, 0xB3, 0x08),      // Gold
            error: Color::Rgb(0xF8, 0x71, 0x71),        // Soft red

            bg_dark: Color::Rgb(0x0A, 0x1A, 0x14),      // Deep green-black
            bg_highlight: Color::Rgb(0x1E, 0x40, 0x34), // Bottle green

            text: Color::Rgb(0xEC, 0xFD, 0xF5),         // Mint white
            text_muted: Color::Rgb(0x6E, 0xE7, 0xB7),   // Pale emerald
            text_dim: Color::Rgb(0x34, 0x5C, 0x4D),     // Dim moss
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Styles
    // ══════════════════════════════════════════════════════════════════════

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.colors.bg_highlight)
            .fg(self.colors.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tile_border(&self) -> Style {
        Style::default().fg(self.colors.primary)
    }

    pub fn tile_symbol(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn verdict_correct(&self) -> Style {
        Style::default()
            .fg(self.colors.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn verdict_incorrect(&self) -> Style {
        Style::default()
            .fg(self.colors.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn miss_marker(&self) -> Style {
        Style::default()
            .fg(self.colors.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }
}
