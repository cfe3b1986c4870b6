//! Header widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::AppState;
use crate::ui::theme::Theme;

pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl<'a> Widget for Header<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Squeezed out on short terminals
        if area.height == 0 || area.width == 0 {
            return;
        }

        buf.set_style(area, self.theme.styles.header);

        let muted = Style::default().fg(self.theme.colors.fg_muted);
        let tick = self.state.snapshot.as_ref().map(|s| s.tick).unwrap_or(0);

        let spans = vec![
            Span::styled(
                " ◉ SYSTEM MONITOR ",
                Style::default()
                    .fg(self.theme.colors.accent_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", muted),
            Span::styled(
                format!("probe {}", self.state.probe_host),
                Style::default().fg(self.theme.colors.fg_primary),
            ),
            Span::styled(" │ ", muted),
            Span::styled(
                format!("every {}ms", self.state.interval.as_millis()),
                Style::default().fg(self.theme.colors.fg_secondary),
            ),
            Span::styled(" │ ", muted),
            Span::styled(
                format!("tick #{}", tick),
                Style::default().fg(self.theme.colors.fg_secondary),
            ),
        ];

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        // Clock on the right, from the latest sample
        let time = self
            .state
            .snapshot
            .as_ref()
            .map(|s| s.taken_at.format("%H:%M:%S").to_string())
            .unwrap_or_default();
        if !time.is_empty() && area.width > time.len() as u16 + 1 {
            let time_x = area.x + area.width - (time.len() as u16 + 1);
            buf.set_string(time_x, area.y, &time, muted);
        }
    }
}
