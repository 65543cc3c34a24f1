//! Store selection and demo seed data.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use ab_core::ports::RecordStorePort;
use ab_core::{AbbreviationRecord, RECORDS_TABLE};
use ab_infra::{InMemoryRecordStore, RestRecordStore};

use crate::config::AppConfig;

/// Build the record store the session runs against: the remote REST store
/// when configured, otherwise a seeded in-memory store.
pub fn build_store(config: &AppConfig) -> Result<Arc<dyn RecordStorePort>> {
    match &config.store_url {
        Some(url) => {
            info!(url = %url, "using remote record store");
            Ok(Arc::new(RestRecordStore::new(
                url.clone(),
                config.store_api_key.clone(),
            )?))
        }
        None => {
            info!("no store configured, using seeded in-memory store");
            Ok(Arc::new(seeded_demo_store()))
        }
    }
}

fn seeded_demo_store() -> InMemoryRecordStore {
    let now = Utc::now();
    let mut completed = AbbreviationRecord::new(
        "HTTP",
        "Hypertext Transfer Protocol",
        "HTTP is the foundation of data exchange on the web.",
        now,
    );
    completed.completed = true;
    let mut deleted = AbbreviationRecord::new("FYI", "For Your Information", "", now);
    deleted.deleted = true;

    InMemoryRecordStore::seeded(
        RECORDS_TABLE,
        vec![
            AbbreviationRecord::new(
                "API",
                "Application Programming Interface",
                "The service exposes a small HTTP API.",
                now,
            ),
            AbbreviationRecord::new("TLS", "Transport Layer Security", "", now),
            completed,
            deleted,
        ],
    )
}
