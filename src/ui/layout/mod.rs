//! Layout management: header, status strip, 2x2 panel grid, footer

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed layout rects for all panels
#[derive(Debug, Clone, Default)]
pub struct ComputedLayout {
    pub header: Rect,
    pub status: Rect,
    pub cpu_panel: Rect,
    pub ram_panel: Rect,
    pub disk_panel: Rect,
    pub latency_panel: Rect,
    pub footer: Rect,
    pub overlay_area: Rect,
}

pub struct LayoutManager;

impl LayoutManager {
    /// Compute all panel rects for the given terminal area
    pub fn compute(area: Rect) -> ComputedLayout {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Current status
                Constraint::Min(8),    // Panels
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[2]);

        let top = Self::halves(rows[0]);
        let bottom = Self::halves(rows[1]);

        ComputedLayout {
            header: main_chunks[0],
            status: main_chunks[1],
            cpu_panel: top[0],
            ram_panel: top[1],
            disk_panel: bottom[0],
            latency_panel: bottom[1],
            footer: main_chunks[3],
            overlay_area: Self::centered_rect(50, 60, area),
        }
    }

    fn halves(area: Rect) -> [Rect; 2] {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        [chunks[0], chunks[1]]
    }

    /// Create a centered rect with given percentage width/height
    fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_panels_tile_without_overlap() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = LayoutManager::compute(area);
        let panels = [
            layout.cpu_panel,
            layout.ram_panel,
            layout.disk_panel,
            layout.latency_panel,
        ];

        for (i, a) in panels.iter().enumerate() {
            assert!(
                a.right() <= area.right() && a.bottom() <= area.bottom(),
                "panel {i} outside area"
            );
            assert!(a.width > 0 && a.height > 0);
            for b in panels.iter().skip(i + 1) {
                assert!(!a.intersects(*b), "{a:?} overlaps {b:?}");
            }
        }

        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.y, 39);
    }
}
