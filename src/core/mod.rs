// src/core/mod.rs
//! Shared services for the HTTP server and the CLI

pub mod config_manager;

pub use config_manager::{ConfigManager, CrawlerConfig, ServerSettings};
