//! Configuration system for Vitals

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::history::DEFAULT_HISTORY_CAPACITY;
use crate::integrations::ping::{DEFAULT_PROBE_HOST, DEFAULT_PROBE_TIMEOUT};

/// Global application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub probe: ProbeConfig,
    pub display: DisplayConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vitals").join("config.toml"))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.general.interval_ms.max(100))
    }

    /// Probe timeout, capped at four fifths of the tick interval so a slow
    /// probe never runs into the next tick.
    pub fn probe_timeout(&self) -> Duration {
        let requested = Duration::from_millis(self.probe.timeout_ms);
        let ceiling = self.tick_interval() * 4 / 5;
        if requested > ceiling {
            tracing::warn!(
                timeout_ms = self.probe.timeout_ms,
                ceiling_ms = ceiling.as_millis() as u64,
                "probe timeout exceeds the tick budget, capping"
            );
            return ceiling;
        }
        requested
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Milliseconds between ticks.
    pub interval_ms: u64,
    /// Number of successful probes kept for the chart.
    pub history_capacity: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    pub host: String,
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PROBE_HOST.to_string(),
            timeout_ms: DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "slate".to_string(),
        }
    }
}

/// Write the default configuration to `path`
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("Created {}", path.display());
    Ok(())
}
