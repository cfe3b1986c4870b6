//! Main UI renderer

use ratatui::Frame;

use crate::core::state::{AppMode, AppState};
use crate::ui::layout::LayoutManager;
use crate::ui::widgets::*;

pub struct Renderer;

impl Renderer {
    /// Draw every panel from the current state. Each widget clears its own area first.
    pub fn render(frame: &mut Frame, state: &AppState) {
        let area = frame.area();
        let theme = &state.theme;

        // Clear background
        frame.render_widget(
            ratatui::widgets::Block::default()
                .style(ratatui::style::Style::default().bg(theme.colors.bg_primary)),
            area,
        );

        let layout = LayoutManager::compute(area);
        let snapshot = state.snapshot.as_ref();
        let stale = snapshot.is_some_and(|s| s.metrics_stale);

        frame.render_widget(Header::new(state, theme), layout.header);
        frame.render_widget(StatusBar::new(state, theme), layout.status);

        frame.render_widget(
            RingGauge::new("CPU Usage", snapshot.map(|s| s.cpu_percent), theme).stale(stale),
            layout.cpu_panel,
        );
        frame.render_widget(
            RingGauge::new("RAM Usage", snapshot.map(|s| s.ram_percent), theme).stale(stale),
            layout.ram_panel,
        );
        frame.render_widget(
            RingGauge::new("Disk Usage", snapshot.map(|s| s.disk_percent), theme).stale(stale),
            layout.disk_panel,
        );
        frame.render_widget(
            LatencyChart::new(&state.history, theme),
            layout.latency_panel,
        );

        frame.render_widget(Footer::new(state, theme), layout.footer);

        if state.mode == AppMode::Help {
            frame.render_widget(HelpOverlay::new(state, theme), layout.overlay_area);
        }
    }
}
