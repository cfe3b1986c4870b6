//! Line chart of recent probe latencies

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        block::Title,
        Block, Borders, Clear, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::core::history::LatencyHistory;
use crate::core::state::format_latency;
use crate::ui::theme::Theme;

/// Y range used until there is a non-zero measurement to scale against.
pub const DEFAULT_Y_MAX: f64 = 100.0;
/// Headroom above the largest latency in view.
pub const Y_HEADROOM: f64 = 1.2;
pub const X_CAPTION: &str = "Time Sequence";

/// Plot geometry derived from the history, independent of any terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyChartModel {
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Every other index, starting with the oldest.
    pub x_ticks: Vec<u64>,
}

impl LatencyChartModel {
    pub fn from_history(history: &LatencyHistory) -> Self {
        let points: Vec<(f64, f64)> = history
            .entries()
            .map(|e| (e.index as f64, e.latency_ms))
            .collect();

        let y_max = history
            .max_latency()
            .filter(|max| *max > 0.0)
            .map(|max| max * Y_HEADROOM)
            .unwrap_or(DEFAULT_Y_MAX);

        let x_bounds = match (points.first(), points.last()) {
            (Some(first), Some(last)) if first.0 < last.0 => [first.0, last.0],
            (Some(only), _) => [only.0 - 1.0, only.0 + 1.0],
            _ => [0.0, 1.0],
        };

        let x_ticks = history.indices().into_iter().step_by(2).collect();

        Self {
            points,
            x_bounds,
            y_bounds: [0.0, y_max],
            x_ticks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bottom, middle and top of the y range, formatted for the gutter.
    pub fn y_labels(&self) -> [String; 3] {
        let top = self.y_bounds[1];
        let fmt = |v: f64| {
            if top < 10.0 {
                format!("{:.1}", v)
            } else {
                format!("{:.0}", v)
            }
        };
        [fmt(0.0), fmt(top / 2.0), fmt(top)]
    }

    /// Column offset (within `width`) for an x value.
    pub fn x_to_column(&self, x: f64, width: u16) -> u16 {
        if width == 0 {
            return 0;
        }
        let [lo, hi] = self.x_bounds;
        let frac = ((x - lo) / (hi - lo)).clamp(0.0, 1.0);
        (frac * (width - 1) as f64).round() as u16
    }

    /// Start columns for the x tick labels, dropping any that would touch
    /// the previous label or spill past `width`.
    pub fn x_label_positions(&self, width: u16) -> Vec<(u16, String)> {
        let mut positions = Vec::new();
        let mut next_free = 0u16;

        for &index in &self.x_ticks {
            let label = index.to_string();
            let len = label.width() as u16;
            if len > width {
                continue;
            }

            let center = self.x_to_column(index as f64, width);
            let start = center.saturating_sub(len / 2).min(width - len);
            if start < next_free {
                continue;
            }

            next_free = start + len + 1;
            positions.push((start, label));
        }

        positions
    }
}

pub struct LatencyChart<'a> {
    history: &'a LatencyHistory,
    theme: &'a Theme,
}

impl<'a> LatencyChart<'a> {
    pub fn new(history: &'a LatencyHistory, theme: &'a Theme) -> Self {
        Self { history, theme }
    }
}

impl<'a> Widget for LatencyChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let mut block = Block::default()
            .title(Span::styled(
                " Network Latency History (ms) ",
                self.theme.styles.panel_title,
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border)
            .style(Style::default().bg(self.theme.colors.bg_primary));

        if let Some(latest) = self.history.latest() {
            block = block.title(
                Title::from(Span::styled(
                    format!(" last {} ", format_latency(Some(latest.latency_ms))),
                    self.theme.styles.value,
                ))
                .alignment(Alignment::Right),
            );
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let model = LatencyChartModel::from_history(self.history);
        let y_labels = model.y_labels();
        let gutter = y_labels.iter().map(|l| l.width()).max().unwrap_or(1) as u16 + 1;

        // Room for the y gutter, an axis row and a label row
        if inner.height < 4 || inner.width < gutter + 4 {
            return;
        }

        // The x caption gets its own row once the plot keeps at least four
        let captioned = inner.height >= 7;
        let reserved = if captioned { 3 } else { 2 };

        let plot = Rect {
            x: inner.x + gutter,
            y: inner.y,
            width: inner.width - gutter,
            height: inner.height - reserved,
        };
        let axis_y = plot.y + plot.height;
        let label_y = axis_y + 1;

        if captioned {
            let width = (X_CAPTION.width() as u16).min(plot.width);
            let x = plot.x + (plot.width - width) / 2;
            buf.set_stringn(
                x,
                label_y + 1,
                X_CAPTION,
                width as usize,
                self.theme.styles.axis_label,
            );
        }

        // Y axis with bottom/middle/top labels
        let axis = self.theme.styles.axis;
        for y in plot.y..axis_y {
            buf.set_string(plot.x - 1, y, "│", axis);
        }
        buf.set_string(plot.x - 1, axis_y, "└", axis);
        buf.set_string(plot.x, axis_y, "─".repeat(plot.width as usize), axis);

        let label_rows = [axis_y - 1, plot.y + (plot.height - 1) / 2, plot.y];
        for (label, y) in y_labels.iter().zip(label_rows) {
            let x = inner.x + (gutter - 1).saturating_sub(label.width() as u16);
            buf.set_string(x, y, label, self.theme.styles.axis_label);
        }

        if model.is_empty() {
            let msg = "waiting for first reply";
            let width = (msg.width() as u16).min(plot.width);
            let x = plot.x + (plot.width - width) / 2;
            let y = plot.y + plot.height / 2;
            buf.set_stringn(x, y, msg, width as usize, self.theme.styles.axis);
            return;
        }

        let line_color = self.theme.colors.accent_primary;
        let marker_color = self.theme.colors.accent_secondary;

        Canvas::default()
            .background_color(self.theme.colors.bg_primary)
            .marker(Marker::Braille)
            .x_bounds(model.x_bounds)
            .y_bounds(model.y_bounds)
            .paint(|ctx| {
                for pair in model.points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: pair[0].1,
                        x2: pair[1].0,
                        y2: pair[1].1,
                        color: line_color,
                    });
                }
                ctx.layer();
                ctx.draw(&Points {
                    coords: &model.points,
                    color: marker_color,
                });
            })
            .render(plot, buf);

        for (column, label) in model.x_label_positions(plot.width) {
            buf.set_string(plot.x + column, label_y, label, self.theme.styles.axis_label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn history_of(samples: &[Option<f64>]) -> LatencyHistory {
        let mut history = LatencyHistory::default();
        for sample in samples {
            history.record(*sample);
        }
        history
    }

    fn is_braille(symbol: &str) -> bool {
        symbol
            .chars()
            .any(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
    }

    #[test]
    fn y_axis_has_twenty_percent_headroom() {
        let history = history_of(&[Some(10.0), Some(50.0), Some(20.0)]);
        let model = LatencyChartModel::from_history(&history);
        assert_eq!(model.y_bounds[0], 0.0);
        assert!((model.y_bounds[1] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn empty_history_uses_default_range() {
        let model = LatencyChartModel::from_history(&LatencyHistory::default());
        assert!(model.is_empty());
        assert_eq!(model.y_bounds, [0.0, DEFAULT_Y_MAX]);
        assert!(model.x_ticks.is_empty());
    }

    #[test]
    fn all_zero_latencies_use_default_range() {
        let history = history_of(&[Some(0.0), Some(0.0)]);
        let model = LatencyChartModel::from_history(&history);
        assert_eq!(model.y_bounds, [0.0, DEFAULT_Y_MAX]);
        assert_eq!(model.points.len(), 2);
    }

    #[test]
    fn x_axis_follows_indices_including_gaps() {
        let history = history_of(&[Some(1.0), None, None, Some(2.0), Some(3.0)]);
        let model = LatencyChartModel::from_history(&history);
        assert_eq!(model.points, vec![(1.0, 1.0), (4.0, 2.0), (5.0, 3.0)]);
        assert_eq!(model.x_bounds, [1.0, 5.0]);
    }

    #[test]
    fn single_point_is_padded() {
        let history = history_of(&[None, None, Some(7.0)]);
        let model = LatencyChartModel::from_history(&history);
        assert_eq!(model.x_bounds, [2.0, 4.0]);
    }

    #[test]
    fn ticks_are_thinned_to_every_other_index() {
        let mut history = LatencyHistory::default();
        for i in 1..=15 {
            history.append(i as f64);
        }
        let model = LatencyChartModel::from_history(&history);
        assert_eq!(model.x_ticks, vec![6, 8, 10, 12, 14]);
    }

    #[test]
    fn label_positions_are_ordered_and_fit() {
        let mut history = LatencyHistory::default();
        for i in 1..=120 {
            history.append(i as f64);
        }
        let model = LatencyChartModel::from_history(&history);

        for width in [8u16, 20, 37, 80] {
            let positions = model.x_label_positions(width);
            assert!(!positions.is_empty());
            for pair in positions.windows(2) {
                let end_of_first = pair[0].0 + pair[0].1.len() as u16;
                assert!(end_of_first < pair[1].0, "labels touch at width {width}");
            }
            for (start, label) in &positions {
                assert!(start + label.len() as u16 <= width);
            }
        }
    }

    #[test]
    fn extreme_indices_map_to_edges() {
        let history = history_of(&[Some(1.0), Some(1.0), Some(1.0)]);
        let model = LatencyChartModel::from_history(&history);
        assert_eq!(model.x_to_column(1.0, 21), 0);
        assert_eq!(model.x_to_column(3.0, 21), 20);
        assert_eq!(model.x_to_column(2.0, 21), 10);
    }

    #[test]
    fn empty_history_renders_without_a_series() {
        let theme = Theme::default();
        let history = LatencyHistory::default();
        let area = Rect::new(0, 0, 50, 14);
        let mut buf = Buffer::empty(area);

        LatencyChart::new(&history, &theme).render(area, &mut buf);

        for y in 0..area.height {
            for x in 0..area.width {
                assert!(!is_braille(buf[(x, y)].symbol()), "data drawn at ({x}, {y})");
            }
        }
    }

    #[test]
    fn history_renders_a_series() {
        let theme = Theme::default();
        let history = history_of(&[Some(12.0), Some(30.0), None, Some(18.0)]);
        let area = Rect::new(0, 0, 50, 14);
        let mut buf = Buffer::empty(area);

        LatencyChart::new(&history, &theme).render(area, &mut buf);

        let drawn = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .filter(|&(x, y)| is_braille(buf[(x, y)].symbol()))
            .count();
        assert!(drawn > 0);
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn axes_are_captioned_and_latest_reply_is_shown() {
        let theme = Theme::default();
        let history = history_of(&[Some(12.0), Some(30.0), None, Some(18.0)]);
        let area = Rect::new(0, 0, 50, 14);
        let mut buf = Buffer::empty(area);

        LatencyChart::new(&history, &theme).render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("last 18.0 ms"));
        assert!(row_text(&buf, 0).contains("(ms)"));
        assert!(row_text(&buf, area.height - 2).contains(X_CAPTION));
    }

    #[test]
    fn short_panel_drops_the_caption() {
        let theme = Theme::default();
        let history = history_of(&[Some(12.0), Some(30.0)]);
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);

        LatencyChart::new(&history, &theme).render(area, &mut buf);

        let text: String = (0..area.height).map(|y| row_text(&buf, y)).collect();
        assert!(!text.contains(X_CAPTION));
    }

    #[test]
    fn tiny_area_is_tolerated() {
        let theme = Theme::default();
        let history = history_of(&[Some(5.0)]);
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        LatencyChart::new(&history, &theme).render(area, &mut buf);
    }
}
