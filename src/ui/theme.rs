//! Theme definitions for fxpanel
//!
//! Two themes, light and dark. Each one restates every color the UI
//! uses, so switching replaces the whole palette at once.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub field_bg: Color,
    pub button_bg: Color,
    pub button_fg: Color,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Self::light(),
            ThemeName::Dark => Self::dark(),
        }
    }

    /// Light theme (default): black on white
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(255, 255, 255),
            fg: Color::Rgb(0, 0, 0),
            fg_dim: Color::Rgb(110, 110, 110),

            accent: Color::Rgb(26, 115, 232),     // #1a73e8

            border: Color::Rgb(218, 220, 224),    // #dadce0
            border_focused: Color::Rgb(26, 115, 232),
            selection_bg: Color::Rgb(210, 227, 252), // #d2e3fc
            selection_fg: Color::Rgb(0, 0, 0),
            field_bg: Color::Rgb(255, 255, 255),
            button_bg: Color::Rgb(241, 243, 244), // #f1f3f4
            button_fg: Color::Rgb(0, 0, 0),
        }
    }

    /// Dark theme: white on #202124
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(32, 33, 36),           // #202124
            fg: Color::Rgb(255, 255, 255),
            fg_dim: Color::Rgb(154, 160, 166),    // #9aa0a6

            accent: Color::Rgb(138, 180, 248),    // #8ab4f8

            border: Color::Rgb(60, 64, 67),       // #3c4043
            border_focused: Color::Rgb(138, 180, 248),
            selection_bg: Color::Rgb(65, 69, 73), // #414549
            selection_fg: Color::Rgb(255, 255, 255),
            field_bg: Color::Rgb(32, 33, 36),
            button_bg: Color::Rgb(60, 64, 67),
            button_fg: Color::Rgb(255, 255, 255),
        }
    }

    // Style helpers for common UI patterns

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Input field contents
    pub fn field(&self) -> Style {
        Style::default().fg(self.fg).bg(self.field_bg)
    }

    /// Push button
    pub fn button(&self) -> Style {
        Style::default()
            .fg(self.button_fg)
            .bg(self.button_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Border style for a widget depending on focus
    pub fn border_for(&self, focused: bool) -> Style {
        if focused {
            self.border_focused()
        } else {
            self.border()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let light = Theme::from_name(ThemeName::Light);
        assert_eq!(light.bg, Color::Rgb(255, 255, 255));
        assert_eq!(light.fg, Color::Rgb(0, 0, 0));

        let dark = Theme::from_name(ThemeName::Dark);
        assert_eq!(dark.bg, Color::Rgb(32, 33, 36));
        assert_eq!(dark.fg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_dark_then_light_restores() {
        let original = Theme::from_name(ThemeName::Light);
        let mut theme = Theme::from_name(ThemeName::Dark);
        assert_ne!(theme, original);

        theme = Theme::from_name(ThemeName::Light);
        assert_eq!(theme, original);
    }
}
