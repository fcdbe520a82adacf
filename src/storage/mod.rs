//! Storage layer

pub mod config;

pub use config::{AppConfig, ConfigService};
