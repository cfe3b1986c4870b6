//! Per-tick sampling: utilization, one latency probe, history bookkeeping

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::history::LatencyHistory;
use crate::integrations::ping::LatencyProbe;
use crate::integrations::system::{MetricsSource, Utilization};

/// Everything measured during one tick.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub cpu_percent: f32,
    pub ram_percent: f32,
    pub disk_percent: f32,
    /// `None` when the probe failed this tick.
    pub latency_ms: Option<f64>,
    /// Utilization figures are carried over from an earlier tick (or zeroed).
    pub metrics_stale: bool,
    pub taken_at: DateTime<Local>,
}

pub struct Monitor {
    metrics: Box<dyn MetricsSource>,
    probe: Box<dyn LatencyProbe>,
    last_good: Option<Utilization>,
}

impl Monitor {
    pub fn new(metrics: impl MetricsSource + 'static, probe: impl LatencyProbe + 'static) -> Self {
        Self {
            metrics: Box::new(metrics),
            probe: Box::new(probe),
            last_good: None,
        }
    }

    /// Take one snapshot and account for it in `history`.
    ///
    /// Never fails: a failed probe yields `latency_ms = None` and a failed
    /// metrics query falls back to the last good reading.
    pub async fn tick(&mut self, history: &mut LatencyHistory) -> Snapshot {
        let (utilization, metrics_stale) = self.read_utilization();

        let latency_ms = match self.probe.probe().await {
            Ok(ms) => Some(ms),
            Err(e) => {
                debug!(error = %e, "latency probe failed");
                None
            }
        };

        let tick = history.record(latency_ms);

        Snapshot {
            tick,
            cpu_percent: utilization.cpu_percent,
            ram_percent: utilization.ram_percent,
            disk_percent: utilization.disk_percent,
            latency_ms,
            metrics_stale,
            taken_at: Local::now(),
        }
    }

    fn read_utilization(&mut self) -> (Utilization, bool) {
        match self.metrics.sample() {
            Ok(utilization) => {
                self.last_good = Some(utilization);
                (utilization, false)
            }
            Err(e) => {
                warn!(error = %e, "metrics unavailable, reusing last reading");
                (self.last_good.unwrap_or_default(), true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::ping::{MockLatencyProbe, ProbeError};
    use crate::integrations::system::{MetricsError, MockMetricsSource};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn steady_metrics() -> MockMetricsSource {
        let mut metrics = MockMetricsSource::new();
        metrics.expect_sample().returning(|| {
            Ok(Utilization {
                cpu_percent: 12.5,
                ram_percent: 40.0,
                disk_percent: 70.0,
            })
        });
        metrics
    }

    #[tokio::test]
    async fn successful_probe_is_recorded() {
        let mut probe = MockLatencyProbe::new();
        probe.expect_probe().returning(|| Ok(23.4));

        let mut monitor = Monitor::new(steady_metrics(), probe);
        let mut history = LatencyHistory::default();
        let snapshot = monitor.tick(&mut history).await;

        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.latency_ms, Some(23.4));
        assert_eq!(snapshot.cpu_percent, 12.5);
        assert!(!snapshot.metrics_stale);
        assert_eq!(history.values(), vec![23.4]);
    }

    #[tokio::test]
    async fn failed_probe_appends_nothing() {
        let mut probe = MockLatencyProbe::new();
        probe
            .expect_probe()
            .returning(|| Err(ProbeError::Timeout(Duration::from_millis(800))));

        let mut monitor = Monitor::new(steady_metrics(), probe);
        let mut history = LatencyHistory::default();
        let snapshot = monitor.tick(&mut history).await;

        assert_eq!(snapshot.latency_ms, None);
        assert!(history.is_empty());
        assert_eq!(history.last_index(), 1);
    }

    #[tokio::test]
    async fn probe_failures_leave_index_gaps() {
        let mut calls = 0;
        let mut probe = MockLatencyProbe::new();
        probe.expect_probe().returning(move || {
            calls += 1;
            if calls % 2 == 0 {
                Err(ProbeError::MissingRoundTrip)
            } else {
                Ok(calls as f64)
            }
        });

        let mut monitor = Monitor::new(steady_metrics(), probe);
        let mut history = LatencyHistory::default();
        for _ in 0..6 {
            monitor.tick(&mut history).await;
        }

        assert_eq!(history.indices(), vec![1, 3, 5]);
        assert_eq!(history.values(), vec![1.0, 3.0, 5.0]);
    }

    #[tokio::test]
    async fn metrics_failure_reuses_last_good_reading() {
        let mut calls = 0;
        let mut metrics = MockMetricsSource::new();
        metrics.expect_sample().returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(Utilization {
                    cpu_percent: 5.0,
                    ram_percent: 50.0,
                    disk_percent: 90.0,
                })
            } else {
                Err(MetricsError::MemoryUnavailable)
            }
        });
        let mut probe = MockLatencyProbe::new();
        probe.expect_probe().returning(|| Ok(10.0));

        let mut monitor = Monitor::new(metrics, probe);
        let mut history = LatencyHistory::default();
        let first = monitor.tick(&mut history).await;
        let second = monitor.tick(&mut history).await;

        assert!(!first.metrics_stale);
        assert!(second.metrics_stale);
        assert_eq!(second.ram_percent, 50.0);
        assert_eq!(second.disk_percent, 90.0);
    }

    #[tokio::test]
    async fn metrics_failure_before_any_reading_uses_placeholders() {
        let mut metrics = MockMetricsSource::new();
        metrics
            .expect_sample()
            .returning(|| Err(MetricsError::NoVolume));
        let mut probe = MockLatencyProbe::new();
        probe.expect_probe().returning(|| Ok(0.0));

        let mut monitor = Monitor::new(metrics, probe);
        let mut history = LatencyHistory::default();
        let snapshot = monitor.tick(&mut history).await;

        assert!(snapshot.metrics_stale);
        assert_eq!(snapshot.cpu_percent, 0.0);
        assert_eq!(snapshot.latency_ms, Some(0.0));
        assert_eq!(history.len(), 1);
    }
}
