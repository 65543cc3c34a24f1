//! AbbrBoard application orchestration layer
//!
//! This crate contains the list view state machine, the process-wide
//! save-all registry, and the navigation button model driven by it.

pub mod list_view;
pub mod nav;
pub mod registry;

pub use list_view::{ListSnapshot, ListView, ListViewConfig, RowSnapshot, ViewCapabilities};
pub use nav::{ButtonView, SaveAllButton};
pub use registry::{BulkAction, BulkActionUpdate, SaveAllRegistry, SaveAllTrigger};
