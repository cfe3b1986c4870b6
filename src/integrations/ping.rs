//! Single-packet latency probe using the system `ping` utility

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

pub const DEFAULT_PROBE_HOST: &str = "8.8.8.8";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(800);

/// Suppresses the console window a child would otherwise open on Windows.
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Matches `time=23.4ms`, `time=23.4 ms` and the sub-millisecond `time<1ms`.
static ROUND_TRIP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"time([=<])\s*([0-9]+(?:\.[0-9]+)?)(?:ms)?(?:\s|$)")
        .expect("Invalid round-trip regex")
});

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),
    #[error("failed to run ping: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("ping exited unsuccessfully (code {0:?})")]
    Failed(Option<i32>),
    #[error("ping output was not valid UTF-8")]
    Decode(#[from] std::string::FromUtf8Error),
    #[error("no round-trip time in ping output")]
    MissingRoundTrip,
}

/// One latency measurement per call, in milliseconds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LatencyProbe: Send + Sync {
    async fn probe(&self) -> Result<f64, ProbeError>;
}

/// Platform-specific knobs for invoking `ping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    pub fn count_flag(self) -> &'static str {
        match self {
            Self::Windows => "-n",
            Self::Unix => "-c",
        }
    }

    /// Process creation flags for the probe child.
    pub fn creation_flags(self) -> u32 {
        match self {
            Self::Windows => CREATE_NO_WINDOW,
            Self::Unix => 0,
        }
    }

    pub fn ping_args(self, host: &str) -> [String; 3] {
        [self.count_flag().to_string(), "1".to_string(), host.to_string()]
    }
}

#[derive(Debug, Clone)]
pub struct PingProbe {
    host: String,
    timeout: Duration,
    platform: Platform,
}

impl PingProbe {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
            platform: Platform::current(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new("ping");
        command
            .args(self.platform.ping_args(&self.host))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        #[cfg(windows)]
        command.creation_flags(self.platform.creation_flags());

        command
    }
}

impl Default for PingProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_HOST, DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl LatencyProbe for PingProbe {
    async fn probe(&self) -> Result<f64, ProbeError> {
        let child = self.command().spawn()?;

        // Dropping the wait future on timeout drops the child, which kills and reaps it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        if !output.status.success() {
            return Err(ProbeError::Failed(output.status.code()));
        }

        let stdout = String::from_utf8(output.stdout)?;
        parse_latency(&stdout).ok_or(ProbeError::MissingRoundTrip)
    }
}

/// Extract the round-trip time in milliseconds from `ping` output.
///
/// The last `time=` token wins; `time<` is only consulted when no `time=` exists.
pub fn parse_latency(output: &str) -> Option<f64> {
    let mut exact = None;
    let mut bound = None;

    for caps in ROUND_TRIP_REGEX.captures_iter(output) {
        let slot = if &caps[1] == "=" {
            &mut exact
        } else {
            &mut bound
        };
        *slot = Some(caps[2].to_string());
    }

    exact.or(bound)?.parse::<f64>().ok()
}
