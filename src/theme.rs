//! Theme colors, optionally overridden from the `[theme]` config table

use ratatui::style::Color;

use crate::config::ThemeOverrides;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Active borders, current page, links
    pub danger: Color,      // Validation errors
    pub warning: Color,     // Status messages
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Labels, disabled controls
    pub bg_selected: Color, // Selected table row
    pub inactive: Color,    // Inactive borders
    pub header: Color,      // Table headers
}

impl Default for Theme {
    fn default() -> Self {
        // Explorer green on a neutral dark palette
        Self {
            accent: Color::Rgb(34, 197, 94),
            danger: Color::Rgb(239, 68, 68),
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(229, 231, 235),
            text_dim: Color::Rgb(156, 163, 175),
            bg_selected: Color::Rgb(55, 65, 81),
            inactive: Color::Rgb(75, 85, 99),
            header: Color::Rgb(134, 239, 172),
        }
    }
}

impl Theme {
    /// Build the theme from defaults plus any valid overrides
    pub fn load(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();

        let slots: [(&Option<String>, &mut Color, &str); 6] = [
            (&overrides.accent, &mut theme.accent, "accent"),
            (&overrides.danger, &mut theme.danger, "danger"),
            (&overrides.warning, &mut theme.warning, "warning"),
            (&overrides.text, &mut theme.text, "text"),
            (&overrides.text_dim, &mut theme.text_dim, "text_dim"),
            (&overrides.bg_selected, &mut theme.bg_selected, "bg_selected"),
        ];

        for (value, slot, name) in slots {
            if let Some(raw) = value {
                match Self::parse_hex_color(raw) {
                    Some(color) => *slot = color,
                    None => tracing::warn!("Ignoring invalid {} color: {}", name, raw),
                }
            }
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#22c55e"), Some(Color::Rgb(0x22, 0xc5, 0x5e)));
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("#gggggg"), None);
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = ThemeOverrides {
            accent: Some("#010203".to_string()),
            danger: Some("not-a-color".to_string()),
            ..ThemeOverrides::default()
        };
        let theme = Theme::load(&overrides);
        assert_eq!(theme.accent, Color::Rgb(1, 2, 3));
        assert_eq!(theme.danger, Theme::default().danger, "invalid override is ignored");
    }
}
