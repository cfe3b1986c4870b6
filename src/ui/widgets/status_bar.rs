//! Current readings as text, above the gauges

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::core::state::{format_percent, AppState};
use crate::ui::theme::Theme;

pub struct StatusBar<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let styles = &self.theme.styles;
        let separator = || Span::styled("  │  ", styles.axis);

        let percent = |value: Option<f32>| match value {
            Some(v) => Span::styled(format_percent(v), styles.value),
            None => Span::styled("-", styles.value),
        };

        let snapshot = self.state.snapshot.as_ref();
        let mut spans = vec![
            Span::styled("CPU Usage: ", styles.label),
            percent(snapshot.map(|s| s.cpu_percent)),
            separator(),
            Span::styled("RAM Usage: ", styles.label),
            percent(snapshot.map(|s| s.ram_percent)),
            separator(),
            Span::styled("Disk Usage: ", styles.label),
            percent(snapshot.map(|s| s.disk_percent)),
        ];

        if snapshot.is_some_and(|s| s.metrics_stale) {
            spans.push(Span::styled(" (stale)", styles.stale));
        }

        let latency_style = match snapshot {
            Some(s) if s.latency_ms.is_none() => styles.timeout,
            _ => styles.value,
        };
        spans.extend([
            separator(),
            Span::styled("Network Latency: ", styles.label),
            Span::styled(self.state.latency_label(), latency_style),
        ]);

        spans
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(" Current Status ", self.theme.styles.panel_title))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border)
            .style(Style::default().bg(self.theme.colors.bg_primary));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let line = Line::from(self.spans());
        buf.set_line(inner.x + 1, inner.y, &line, inner.width.saturating_sub(2));
    }
}
