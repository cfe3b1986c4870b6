//! Theme system: palettes for gauges, chart and chrome

use ratatui::style::{Color, Modifier, Style};

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub styles: ThemeStyles,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub bg_primary: Color,
    pub bg_secondary: Color,

    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    /// Used wedge of a gauge, chart line
    pub accent_primary: Color,
    /// Chart point markers
    pub accent_secondary: Color,
    /// Remaining wedge of a gauge
    pub gauge_free: Color,

    pub warning: Color,
    pub error: Color,

    pub border: Color,
    pub border_focused: Color,
}

#[derive(Debug, Clone)]
pub struct ThemeStyles {
    pub header: Style,
    pub footer: Style,
    pub panel_title: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub label: Style,
    pub value: Style,
    pub timeout: Style,
    pub stale: Style,
    pub axis: Style,
    pub axis_label: Style,
    pub keybind: Style,
    pub keybind_key: Style,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "tokyo-night" | "tokyonight" => Self::tokyo_night(),
            "nord" => Self::nord(),
            _ => Self::slate(), // Default
        }
    }

    /// Slate: grey canvas with a steel-blue accent (default)
    pub fn slate() -> Self {
        let colors = ThemeColors {
            bg_primary: Color::Rgb(114, 112, 112),
            bg_secondary: Color::Rgb(92, 90, 90),

            fg_primary: Color::Rgb(255, 255, 255),
            fg_secondary: Color::Rgb(232, 232, 232),
            fg_muted: Color::Rgb(196, 194, 194),

            accent_primary: Color::Rgb(23, 117, 164),
            accent_secondary: Color::Rgb(255, 255, 255),
            gauge_free: Color::Rgb(255, 255, 255),

            warning: Color::Rgb(250, 204, 21),
            error: Color::Rgb(255, 120, 120),

            border: Color::Rgb(232, 232, 232),
            border_focused: Color::Rgb(23, 117, 164),
        };

        Self::from_colors("Slate", colors)
    }

    pub fn tokyo_night() -> Self {
        let colors = ThemeColors {
            bg_primary: Color::Rgb(26, 27, 38),
            bg_secondary: Color::Rgb(36, 40, 59),

            fg_primary: Color::Rgb(192, 202, 245),
            fg_secondary: Color::Rgb(169, 177, 214),
            fg_muted: Color::Rgb(86, 95, 137),

            accent_primary: Color::Rgb(122, 162, 247),
            accent_secondary: Color::Rgb(187, 154, 247),
            gauge_free: Color::Rgb(52, 59, 88),

            warning: Color::Rgb(224, 175, 104),
            error: Color::Rgb(247, 118, 142),

            border: Color::Rgb(41, 46, 66),
            border_focused: Color::Rgb(122, 162, 247),
        };

        Self::from_colors("Tokyo Night", colors)
    }

    pub fn nord() -> Self {
        let colors = ThemeColors {
            bg_primary: Color::Rgb(46, 52, 64),
            bg_secondary: Color::Rgb(59, 66, 82),

            fg_primary: Color::Rgb(236, 239, 244),
            fg_secondary: Color::Rgb(229, 233, 240),
            fg_muted: Color::Rgb(216, 222, 233),

            accent_primary: Color::Rgb(136, 192, 208),
            accent_secondary: Color::Rgb(129, 161, 193),
            gauge_free: Color::Rgb(76, 86, 106),

            warning: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),

            border: Color::Rgb(67, 76, 94),
            border_focused: Color::Rgb(136, 192, 208),
        };

        Self::from_colors("Nord", colors)
    }

    fn from_colors(name: &str, colors: ThemeColors) -> Self {
        let styles = ThemeStyles {
            header: Style::default()
                .bg(colors.bg_secondary)
                .fg(colors.fg_primary),
            footer: Style::default().bg(colors.bg_secondary).fg(colors.fg_muted),
            panel_title: Style::default()
                .fg(colors.fg_primary)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(colors.border),
            panel_border_focused: Style::default().fg(colors.border_focused),
            label: Style::default().fg(colors.fg_secondary),
            value: Style::default()
                .fg(colors.fg_primary)
                .add_modifier(Modifier::BOLD),
            timeout: Style::default()
                .fg(colors.error)
                .add_modifier(Modifier::BOLD),
            stale: Style::default()
                .fg(colors.warning)
                .add_modifier(Modifier::ITALIC),
            axis: Style::default().fg(colors.fg_muted),
            axis_label: Style::default().fg(colors.fg_secondary),
            keybind: Style::default().fg(colors.fg_muted),
            keybind_key: Style::default()
                .fg(colors.accent_secondary)
                .add_modifier(Modifier::BOLD),
        };

        Self {
            name: name.to_string(),
            colors,
            styles,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::slate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_slate() {
        assert_eq!(Theme::from_name("no-such-theme").name, "Slate");
        assert_eq!(Theme::from_name("NORD").name, "Nord");
        assert_eq!(Theme::from_name("tokyo-night").name, "Tokyo Night");
    }
}
