//! AbbrBoard composition shell.
//!
//! Wires the application layer to concrete adapters: tracing bootstrap,
//! environment configuration, and store selection. The binary in `main.rs`
//! drives a headless session over the three standard pages.

pub mod bootstrap;
pub mod config;
pub mod wiring;

pub use config::AppConfig;
