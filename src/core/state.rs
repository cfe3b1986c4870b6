//! Application state owned by the tick loop

use std::time::Duration;

use crate::core::history::LatencyHistory;
use crate::core::monitor::Snapshot;
use crate::ui::theme::Theme;

/// Top-level application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal dashboard view
    #[default]
    Dashboard,
    /// Help overlay showing
    Help,
}

impl AppMode {
    pub fn toggle_help(self) -> Self {
        match self {
            Self::Dashboard => Self::Help,
            Self::Help => Self::Dashboard,
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: AppMode,
    /// Latest tick's measurements; `None` until the first tick completes.
    pub snapshot: Option<Snapshot>,
    pub history: LatencyHistory,
    pub theme: Theme,
    pub probe_host: String,
    pub interval: Duration,
}

impl AppState {
    pub fn new(
        theme: Theme,
        history_capacity: usize,
        probe_host: String,
        interval: Duration,
    ) -> Self {
        Self {
            mode: AppMode::Dashboard,
            snapshot: None,
            history: LatencyHistory::new(history_capacity),
            theme,
            probe_host,
            interval,
        }
    }

    /// Text for the latency readout: a value, "Timeout", or a dash before the first tick.
    pub fn latency_label(&self) -> String {
        match &self.snapshot {
            Some(snapshot) => format_latency(snapshot.latency_ms),
            None => "-".to_string(),
        }
    }
}

/// `Some(0.0)` is a real measurement and renders as `0.0 ms`.
pub fn format_latency(latency_ms: Option<f64>) -> String {
    match latency_ms {
        Some(ms) => format!("{:.1} ms", ms),
        None => "Timeout".to_string(),
    }
}

pub fn format_percent(value: f32) -> String {
    format!("{:.1}%", value)
}
