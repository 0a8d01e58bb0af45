//! UI color palette, with optional overrides from the `[theme]` section
//! of the config file.

use ratatui::style::Color;

use crate::config::ThemeColors;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Active borders, current player, key hints
    pub danger: Color,      // Mismatch feedback
    pub success: Color,     // Matched cards, winner announcement
    pub warning: Color,     // Status messages
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Hidden card backs, dimmed hints
    pub bg_selected: Color, // Cursor cell background
    pub inactive: Color,    // Idle borders
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired defaults
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(249, 226, 175),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
        }
    }
}

impl Theme {
    /// Build the palette, applying any hex overrides from the config.
    pub fn from_overrides(colors: &ThemeColors) -> Self {
        let base = Self::default();
        let pick = |s: &Option<String>, fallback: Color| {
            s.as_deref().and_then(parse_hex_color).unwrap_or(fallback)
        };

        Self {
            accent: pick(&colors.accent, base.accent),
            danger: pick(&colors.danger, base.danger),
            success: pick(&colors.success, base.success),
            warning: base.warning,
            text: pick(&colors.text, base.text),
            text_dim: pick(&colors.text_dim, base.text_dim),
            bg_selected: pick(&colors.bg_selected, base.bg_selected),
            inactive: pick(&colors.inactive, base.inactive),
        }
    }
}

/// Parse a hex color string (#RRGGBB or #RGB)
fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');

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
    fn parses_six_digit_hex() {
        assert_eq!(parse_hex_color("#FFC107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(parse_hex_color("121212"), Some(Color::Rgb(18, 18, 18)));
    }

    #[test]
    fn parses_three_digit_hex() {
        assert_eq!(parse_hex_color("#f00"), Some(Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("red"), None);
    }

    #[test]
    fn overrides_apply_over_defaults() {
        let colors = ThemeColors {
            accent: Some("#102030".to_string()),
            danger: Some("not-a-color".to_string()),
            ..ThemeColors::default()
        };
        let theme = Theme::from_overrides(&colors);

        assert_eq!(theme.accent, Color::Rgb(16, 32, 48));
        // Bad override falls back to the default
        assert_eq!(theme.danger, Theme::default().danger);
    }
}
