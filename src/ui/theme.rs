//! Light and dark colour palettes.

use ratatui::style::{Color, Style};

use crate::config::ThemeSetting;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl From<ThemeSetting> for Theme {
    fn from(setting: ThemeSetting) -> Self {
        match setting {
            ThemeSetting::Light => Theme::Light,
            ThemeSetting::Dark => Theme::Dark,
        }
    }
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Background and default text colour for the whole screen
    pub fn base(self) -> Style {
        match self {
            Theme::Light => Style::default().bg(Color::White).fg(Color::Black),
            Theme::Dark => Style::default()
                .bg(Color::Rgb(0x12, 0x12, 0x12))
                .fg(Color::White),
        }
    }

    /// Background of panels such as the log table
    pub fn panel(self) -> Style {
        match self {
            Theme::Light => Style::default().bg(Color::White).fg(Color::Black),
            Theme::Dark => Style::default()
                .bg(Color::Rgb(0x1e, 0x1e, 0x1e))
                .fg(Color::White),
        }
    }

    pub fn border(self) -> Color {
        match self {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::Cyan,
        }
    }

    pub fn muted(self) -> Color {
        match self {
            Theme::Light => Color::DarkGray,
            Theme::Dark => Color::Gray,
        }
    }

    pub fn ok(self) -> Color {
        Color::Green
    }

    pub fn alert(self) -> Color {
        match self {
            Theme::Light => Color::Red,
            Theme::Dark => Color::LightRed,
        }
    }

    pub fn highlight(self) -> Color {
        match self {
            Theme::Light => Color::Magenta,
            Theme::Dark => Color::Yellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::from(ThemeSetting::Dark), Theme::Dark);
    }
}
