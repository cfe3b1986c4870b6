//! UI Widgets

pub mod footer;
pub mod header;
pub mod help_overlay;
pub mod latency_chart;
pub mod ring_gauge;
pub mod status_bar;

pub use footer::Footer;
pub use header::Header;
pub use help_overlay::HelpOverlay;
pub use latency_chart::LatencyChart;
pub use ring_gauge::RingGauge;
pub use status_bar::StatusBar;
