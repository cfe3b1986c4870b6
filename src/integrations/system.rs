//! Local utilization readings backed by `sysinfo`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};
use thiserror::Error;

/// Point-in-time utilization percentages, each in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Utilization {
    pub cpu_percent: f32,
    pub ram_percent: f32,
    pub disk_percent: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    #[error("total memory reported as zero")]
    MemoryUnavailable,
    #[error("no mounted volume with a non-zero size")]
    NoVolume,
    #[error("{metric} reading out of range: {value}")]
    InvalidReading { metric: &'static str, value: f32 },
}

/// Anything that can report current utilization.
#[cfg_attr(test, mockall::automock)]
pub trait MetricsSource {
    fn sample(&mut self) -> Result<Utilization, MetricsError>;
}

/// Space figures for one mounted volume.
#[derive(Debug, Clone)]
pub struct VolumeUsage {
    pub mount_point: PathBuf,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Maintains a reusable `sysinfo::System` instance to avoid reallocation on every tick.
pub struct SystemMonitor {
    sys: System,
    disks: Disks,
}

impl SystemMonitor {
    pub fn new() -> Self {
        // Preload the pieces we care about and perform an initial refresh so the
        // first tick has a CPU baseline to diff against.
        let mut sys = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::new().with_cpu_usage())
                .with_memory(MemoryRefreshKind::new().with_ram()),
        );
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let disks = Disks::new_with_refreshed_list();

        Self { sys, disks }
    }

    fn volumes(&self) -> Vec<VolumeUsage> {
        self.disks
            .list()
            .iter()
            .map(|disk| VolumeUsage {
                mount_point: disk.mount_point().to_path_buf(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect()
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SystemMonitor {
    fn sample(&mut self) -> Result<Utilization, MetricsError> {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.disks.refresh();
        if self.disks.list().is_empty() {
            self.disks.refresh_list();
        }

        let cpu_percent = checked_percent("cpu", self.sys.global_cpu_usage())?;

        let total_memory = self.sys.total_memory();
        if total_memory == 0 {
            return Err(MetricsError::MemoryUnavailable);
        }
        let ram_percent = checked_percent(
            "ram",
            ((self.sys.used_memory() as f64 / total_memory as f64) * 100.0) as f32,
        )?;

        let disk_percent = checked_percent("disk", primary_volume_percent(&self.volumes())?)?;

        Ok(Utilization {
            cpu_percent,
            ram_percent,
            disk_percent,
        })
    }
}

/// Used-space percentage of the root volume, or of the first sized volume when
/// nothing is mounted at `/`.
pub fn primary_volume_percent(volumes: &[VolumeUsage]) -> Result<f32, MetricsError> {
    let sized = || volumes.iter().filter(|v| v.total_bytes > 0);
    let volume = sized()
        .find(|v| v.mount_point == Path::new("/"))
        .or_else(|| sized().next())
        .ok_or(MetricsError::NoVolume)?;

    let used = volume.total_bytes.saturating_sub(volume.available_bytes);
    Ok(((used as f64 / volume.total_bytes as f64) * 100.0) as f32)
}

/// Rejects NaN and anything meaningfully outside `0..=100`; clamps float noise.
fn checked_percent(metric: &'static str, value: f32) -> Result<f32, MetricsError> {
    if !value.is_finite() || !(-0.5..=100.5).contains(&value) {
        return Err(MetricsError::InvalidReading { metric, value });
    }
    Ok(value.clamp(0.0, 100.0))
}
