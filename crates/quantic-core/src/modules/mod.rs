//! Startup-time modules: configuration loading.

pub mod config;
