//! CLI library components for the column mapper.

pub mod config;
pub mod logging;
pub mod service;
