//! Help overlay widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::core::state::AppState;
use crate::ui::theme::Theme;

pub struct HelpOverlay<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl<'a> Widget for HelpOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(" Help ", self.theme.styles.panel_title))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border_focused)
            .style(Style::default().bg(self.theme.colors.bg_secondary));

        let inner = block.inner(area);
        block.render(area, buf);

        let interval = format!("Sample every {} ms", self.state.interval.as_millis());
        let probe = format!("Ping {} once per tick", self.state.probe_host);
        let history = format!(
            "Chart keeps the last {} replies",
            self.state.history.capacity()
        );

        let sections: [(&str, Vec<(&str, &str)>); 2] = [
            (
                "Keys",
                vec![
                    ("q", "Quit"),
                    ("Ctrl-C", "Quit from anywhere"),
                    ("?", "Toggle help"),
                    ("Esc", "Close help"),
                ],
            ),
            (
                "Sampling",
                vec![
                    ("", interval.as_str()),
                    ("", probe.as_str()),
                    ("", history.as_str()),
                    ("", "Gaps on the x axis are ticks without a reply"),
                ],
            ),
        ];

        let mut y = inner.y;

        for (section, rows) in &sections {
            if y >= inner.y + inner.height {
                break;
            }

            let header = Line::from(vec![Span::styled(
                format!("─── {} ", section),
                Style::default()
                    .fg(self.theme.colors.accent_primary)
                    .add_modifier(Modifier::BOLD),
            )]);
            buf.set_line(inner.x + 1, y, &header, inner.width.saturating_sub(2));
            y += 1;

            for (key, desc) in rows {
                if y >= inner.y + inner.height {
                    break;
                }

                let line = Line::from(vec![
                    Span::styled(format!("  {:>8}  ", key), self.theme.styles.keybind_key),
                    Span::styled(*desc, self.theme.styles.keybind),
                ]);
                buf.set_line(inner.x + 1, y, &line, inner.width.saturating_sub(2));
                y += 1;
            }

            y += 1;
        }
    }
}
