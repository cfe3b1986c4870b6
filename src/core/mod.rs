//! Core - Application loop, sampling and state

pub mod app;
pub mod events;
pub mod history;
pub mod monitor;
pub mod state;
