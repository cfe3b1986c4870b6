//! Donut gauge for a single utilization percentage

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Clear, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::core::state::format_percent;
use crate::ui::theme::Theme;

pub const INNER_RADIUS: f64 = 0.6;
pub const OUTER_RADIUS: f64 = 1.0;

const ANGLE_STEP_DEG: f64 = 2.0;
const RADIAL_STEPS: usize = 5;
const MARGIN: f64 = 1.05;

/// Split a percentage into `(used, remaining)` wedges summing to 100.
pub fn wedge_split(value: f32) -> (f64, f64) {
    let used = if value.is_finite() {
        (value as f64).clamp(0.0, 100.0)
    } else {
        0.0
    };
    (used, 100.0 - used)
}

/// Sample points of the annulus, bucketed by wedge.
#[derive(Debug, Default)]
pub struct RingPoints {
    pub used: Vec<(f64, f64)>,
    pub free: Vec<(f64, f64)>,
}

/// The used wedge starts at 12 o'clock and grows counter-clockwise.
pub fn ring_points(used_percent: f64) -> RingPoints {
    let used_deg = used_percent.clamp(0.0, 100.0) / 100.0 * 360.0;
    let steps = (360.0 / ANGLE_STEP_DEG) as usize;
    let mut points = RingPoints::default();

    for step in 0..steps {
        let offset = (step as f64 + 0.5) * ANGLE_STEP_DEG;
        let angle = (90.0 + offset).to_radians();
        let bucket = if offset < used_deg {
            &mut points.used
        } else {
            &mut points.free
        };

        for r in 0..RADIAL_STEPS {
            let radius = INNER_RADIUS
                + (OUTER_RADIUS - INNER_RADIUS) * r as f64 / (RADIAL_STEPS - 1) as f64;
            bucket.push((radius * angle.cos(), radius * angle.sin()));
        }
    }

    points
}

/// Canvas bounds that keep the ring round on cells roughly twice as tall as wide.
pub fn canvas_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    let w = width.max(1) as f64;
    let h = height.max(1) as f64 * 2.0;

    if w >= h {
        let x = MARGIN * w / h;
        ([-x, x], [-MARGIN, MARGIN])
    } else {
        let y = MARGIN * h / w;
        ([-MARGIN, MARGIN], [-y, y])
    }
}

pub struct RingGauge<'a> {
    title: &'a str,
    /// `None` before the first reading
    value: Option<f32>,
    stale: bool,
    theme: &'a Theme,
}

impl<'a> RingGauge<'a> {
    pub fn new(title: &'a str, value: Option<f32>, theme: &'a Theme) -> Self {
        Self {
            title,
            value,
            stale: false,
            theme,
        }
    }

    pub fn stale(mut self, stale: bool) -> Self {
        self.stale = stale;
        self
    }
}

impl<'a> Widget for RingGauge<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let mut title = vec![Span::styled(
            format!(" {} ", self.title),
            self.theme.styles.panel_title,
        )];
        if self.stale {
            title.push(Span::styled("(stale) ", self.theme.styles.stale));
        }

        let block = Block::default()
            .title(ratatui::text::Line::from(title))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border)
            .style(Style::default().bg(self.theme.colors.bg_primary));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (used, _) = wedge_split(self.value.unwrap_or(0.0));
        let points = ring_points(used);
        let (x_bounds, y_bounds) = canvas_bounds(inner.width, inner.height);
        let used_color = self.theme.colors.accent_primary;
        let free_color = self.theme.colors.gauge_free;

        Canvas::default()
            .background_color(self.theme.colors.bg_primary)
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &points.free,
                    color: free_color,
                });
                ctx.draw(&Points {
                    coords: &points.used,
                    color: used_color,
                });
            })
            .render(inner, buf);

        let label = match self.value {
            Some(value) => format_percent(value),
            None => "--".to_string(),
        };
        let label_width = (label.width() as u16).min(inner.width);
        let x = inner.x + (inner.width - label_width) / 2;
        let y = inner.y + inner.height / 2;
        buf.set_string(x, y, &label, self.theme.styles.value);
    }
}
