//! Environment-driven application configuration.

use std::env;

/// Connection settings for the record store.
///
/// `ABBRBOARD_STORE_URL` points at the managed backend's base URL; when it
/// is unset the session falls back to a seeded in-memory store, which keeps
/// the demo binary runnable without any backend.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub store_url: Option<String>,
    pub store_api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // A missing .env file is fine; plain environment variables still apply.
        dotenvy::dotenv().ok();
        Self {
            store_url: env::var("ABBRBOARD_STORE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            store_api_key: env::var("ABBRBOARD_STORE_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}
