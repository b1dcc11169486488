//! Light and dark color palettes and the theme toggle

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::widgets::Deferred;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,           // Active borders, selected cards, key hints
    pub accent_bright: Color,    // Banner highlights
    pub danger: Color,           // Not-found page
    pub success: Color,          // "Popular" badge
    pub warning: Color,          // "New" badge
    pub text: Color,             // Primary text
    pub text_dim: Color,         // Descriptions, hints
    pub bg: Color,               // Page background
    pub bg_selected: Color,      // Selection background
    pub inactive: Color,         // Inactive borders
    pub header: Color,           // Page titles
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            // Catppuccin Mocha
            ThemeMode::Dark => Self {
                accent: Color::Rgb(250, 179, 135),
                accent_bright: Color::Rgb(245, 194, 231),
                danger: Color::Rgb(243, 139, 168),
                success: Color::Rgb(166, 218, 149),
                warning: Color::Rgb(249, 226, 175),
                text: Color::Rgb(205, 214, 244),
                text_dim: Color::Rgb(147, 153, 178),
                bg: Color::Rgb(30, 30, 46),
                bg_selected: Color::Rgb(69, 71, 90),
                inactive: Color::Rgb(88, 91, 112),
                header: Color::Rgb(137, 180, 250),
            },
            // Catppuccin Latte
            ThemeMode::Light => Self {
                accent: Color::Rgb(254, 100, 11),
                accent_bright: Color::Rgb(234, 118, 203),
                danger: Color::Rgb(210, 15, 57),
                success: Color::Rgb(64, 160, 43),
                warning: Color::Rgb(223, 142, 29),
                text: Color::Rgb(76, 79, 105),
                text_dim: Color::Rgb(108, 111, 133),
                bg: Color::Rgb(239, 241, 245),
                bg_selected: Color::Rgb(204, 208, 218),
                inactive: Color::Rgb(156, 160, 176),
                header: Color::Rgb(30, 102, 245),
            },
        }
    }

    /// Palette for a stored preference; the default palette until it has been read
    pub fn resolve(preference: &Deferred<ThemeMode>, accent_override: Option<&str>) -> Self {
        let mut theme = Self::for_mode(preference.or(ThemeMode::default()));
        if let Some(accent) = accent_override.and_then(parse_hex_color) {
            theme.accent = accent;
        }
        theme
    }
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
        let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
        let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_mode() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }

    #[test]
    fn test_uninitialized_preference_uses_default_palette() {
        let theme = Theme::resolve(&Deferred::Uninitialized, None);
        assert_eq!(theme, Theme::default());

        let light = Theme::resolve(&Deferred::Ready(ThemeMode::Light), None);
        assert_eq!(light, Theme::for_mode(ThemeMode::Light));
    }

    #[test]
    fn test_accent_override() {
        let theme = Theme::resolve(&Deferred::Ready(ThemeMode::Dark), Some("#ffc107"));
        assert_eq!(theme.accent, Color::Rgb(255, 193, 7));

        let theme = Theme::resolve(&Deferred::Ready(ThemeMode::Dark), Some("not a color"));
        assert_eq!(theme.accent, Theme::default().accent);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("1e1e2e"), Some(Color::Rgb(30, 30, 46)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }
}
