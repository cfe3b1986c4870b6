//! Integrations - OS metrics and the latency probe

pub mod ping;
pub mod system;
