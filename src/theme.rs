use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from the user config. Only the first call wins.
pub fn init(config: &ThemeConfig) {
    let _ = THEME.set(config.clone().into_theme());
}

/// The active theme; the default palette until `init` runs.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub selected: Style,
    pub today: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub complete: Style,
    pub accent: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            complete: Style::default().fg(Color::Green),
            accent: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::from_palette(Palette {
                fg: (248, 248, 242),
                bg: (68, 71, 90),
                dim: (98, 114, 164),
                select: (139, 233, 253),
                today: (189, 147, 249),
                ok: (80, 250, 123),
                err: (255, 85, 85),
            }),
            "gruvbox" => Self::from_palette(Palette {
                fg: (235, 219, 178),
                bg: (80, 73, 69),
                dim: (146, 131, 116),
                select: (131, 165, 152),
                today: (250, 189, 47),
                ok: (184, 187, 38),
                err: (251, 73, 52),
            }),
            "nord" => Self::from_palette(Palette {
                fg: (229, 233, 240),
                bg: (67, 76, 94),
                dim: (76, 86, 106),
                select: (136, 192, 208),
                today: (235, 203, 139),
                ok: (163, 190, 140),
                err: (191, 97, 106),
            }),
            _ => Self::default(),
        }
    }

    fn from_palette(p: Palette) -> Self {
        let rgb = |(r, g, b): (u8, u8, u8)| Color::Rgb(r, g, b);
        Self {
            header: Style::default().fg(rgb(p.fg)).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(rgb(p.select)),
            today: Style::default().fg(Color::Black).bg(rgb(p.today)),
            dim: Style::default().fg(rgb(p.dim)),
            border: Style::default().fg(rgb(p.bg)),
            status: Style::default().fg(rgb(p.fg)).bg(rgb(p.bg)),
            complete: Style::default().fg(rgb(p.ok)),
            accent: Style::default().fg(rgb(p.select)),
            error: Style::default().fg(rgb(p.err)).add_modifier(Modifier::BOLD),
        }
    }
}

struct Palette {
    fg: (u8, u8, u8),
    bg: (u8, u8, u8),
    dim: (u8, u8, u8),
    select: (u8, u8, u8),
    today: (u8, u8, u8),
    ok: (u8, u8, u8),
    err: (u8, u8, u8),
}

/// `[theme]` table of the config file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub header_fg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub today_bg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub complete_fg: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let fg_overrides = [
            (&self.header_fg, &mut theme.header),
            (&self.selected_fg, &mut theme.selected),
            (&self.dim_fg, &mut theme.dim),
            (&self.border_fg, &mut theme.border),
            (&self.status_fg, &mut theme.status),
            (&self.complete_fg, &mut theme.complete),
        ];
        for (value, style) in fg_overrides {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *style = style.fg(c);
            }
        }

        let bg_overrides = [
            (&self.selected_bg, &mut theme.selected),
            (&self.today_bg, &mut theme.today),
            (&self.status_bg, &mut theme.status),
        ];
        for (value, style) in bg_overrides {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *style = style.bg(c);
            }
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color(" Cyan "), Some(Color::Cyan));
        assert_eq!(parse_color("grey"), Some(Color::Gray));
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("chartreuse"), None);
        assert_eq!(parse_color("#aébcd"), None);
        assert_eq!(parse_color("#12345g"), None);
    }

    #[test]
    fn non_ascii_hex_override_is_ignored() {
        let config = ThemeConfig {
            selected_bg: Some("#aébcd".into()),
            ..Default::default()
        };
        let theme = config.into_theme();
        assert_eq!(theme.selected.bg, Some(Color::Cyan));
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = ThemeConfig {
            preset: Some("nord".into()),
            selected_bg: Some("red".into()),
            ..Default::default()
        };
        let theme = config.into_theme();
        assert_eq!(theme.selected.bg, Some(Color::Red));
        assert_eq!(theme.today.bg, Some(Color::Rgb(235, 203, 139)));
    }

    #[test]
    fn unknown_preset_falls_back_to_default() {
        let theme = Theme::preset("solarized");
        assert_eq!(theme.selected.bg, Some(Color::Cyan));
    }
}
