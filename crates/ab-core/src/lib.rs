//! # ab-core
//!
//! Core domain models and business rules for AbbrBoard.
//!
//! This crate contains pure domain logic without any infrastructure
//! dependencies: the abbreviation record model, view filters and the
//! query/ordering rules derived from them, and the ports implemented by
//! the infrastructure layer.

// Public module exports
pub mod ids;
pub mod ports;
pub mod query;
pub mod record;

// Re-export commonly used types at the crate root
pub use ids::RecordId;
pub use query::{RecordQuery, ViewFilter, MAX_FETCH_ROWS};
pub use record::{AbbreviationRecord, RecordField, RecordPatch, RECORDS_TABLE};
