//! The filtered list view over abbreviation records.
//!
//! One `ListView` is mounted per page. It owns the in-memory row set for its
//! [`ViewFilter`], exposes row-level and collection-level mutations against
//! the record store, and publishes its bulk-save action into the
//! [`SaveAllRegistry`] whenever the descriptor-relevant state changes.
//!
//! Internal state sits behind a `std::sync::Mutex` that is acquired in
//! short scopes and never held across an await. Fetches are logically
//! cancellable: a request-generation counter marks results from superseded
//! fetches as stale, and stale results are discarded instead of applied.

use std::sync::{Arc, Mutex, Weak};

use futures::future::join_all;
use futures::FutureExt;
use tracing::{error, warn};

use ab_core::ports::{ClockPort, RecordStorePort};
use ab_core::{
    AbbreviationRecord, RecordField, RecordId, RecordPatch, RecordQuery, ViewFilter, RECORDS_TABLE,
};

use crate::registry::{
    BulkActionUpdate, SaveAllRegistry, SaveAllTrigger, DEFAULT_SAVE_ALL_LABEL, SAVING_ALL_LABEL,
};

/// Which actions a view offers on its rows.
///
/// The three standard pages differ only in these flags; there is one list
/// view implementation, not one component per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewCapabilities {
    pub toggle_completed: bool,
    pub move_to_deleted: bool,
    pub restore: bool,
    pub complete_all: bool,
}

/// Static configuration of one list view page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewConfig {
    pub filter: ViewFilter,
    pub capabilities: ViewCapabilities,
    pub title: String,
    pub subtitle: String,
}

impl ListViewConfig {
    /// Entries that still need review.
    pub fn not_completed() -> Self {
        Self {
            filter: ViewFilter::not_completed(),
            capabilities: ViewCapabilities {
                toggle_completed: true,
                move_to_deleted: true,
                restore: false,
                complete_all: true,
            },
            title: "Not Completed".to_string(),
            subtitle: "Entries that still need review.".to_string(),
        }
    }

    /// Reviewed entries marked as completed.
    pub fn completed() -> Self {
        Self {
            filter: ViewFilter::completed(),
            capabilities: ViewCapabilities {
                toggle_completed: true,
                move_to_deleted: true,
                restore: false,
                complete_all: false,
            },
            title: "Completed".to_string(),
            subtitle: "Reviewed entries marked as completed.".to_string(),
        }
    }

    /// Soft-deleted entries; restore is the only row action.
    pub fn deleted() -> Self {
        Self {
            filter: ViewFilter::deleted(),
            capabilities: ViewCapabilities {
                toggle_completed: false,
                move_to_deleted: false,
                restore: true,
                complete_all: false,
            },
            title: "Deleted".to_string(),
            subtitle: "Entries removed from review.".to_string(),
        }
    }
}

/// One row as a shell renders it.
#[derive(Debug, Clone)]
pub struct RowSnapshot {
    pub record: AbbreviationRecord,
    /// A per-row content save is in flight.
    pub saving: bool,
    /// A toggle/move/restore transition is in flight.
    pub updating: bool,
}

/// Render state of the whole view.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub rows: Vec<RowSnapshot>,
    pub loading: bool,
    pub saving_all: bool,
    pub completing_all: bool,
    pub error: Option<String>,
}

impl ListSnapshot {
    pub fn count_label(&self) -> String {
        let n = self.rows.len();
        format!("{} {}", n, if n == 1 { "item" } else { "items" })
    }
}

struct RowState {
    record: AbbreviationRecord,
    saving: bool,
    updating: bool,
}

impl RowState {
    fn new(record: AbbreviationRecord) -> Self {
        Self {
            record,
            saving: false,
            updating: false,
        }
    }
}

struct ListState {
    rows: Vec<RowState>,
    search: String,
    loading: bool,
    saving_all: bool,
    completing_all: bool,
    error: Option<String>,
    /// Bumped by every refresh and by unmount; a fetch whose generation no
    /// longer matches applies nothing.
    generation: u64,
    unmounted: bool,
}

/// The list view state machine. Mounted once per page, operated through
/// `&self`, unmounted explicitly when the page goes away.
pub struct ListView {
    store: Arc<dyn RecordStorePort>,
    clock: Arc<dyn ClockPort>,
    registry: Arc<SaveAllRegistry>,
    config: ListViewConfig,
    /// Created once at mount so repeated registrations keep a stable
    /// trigger identity; holds only a weak reference to the view.
    save_all_trigger: SaveAllTrigger,
    state: Mutex<ListState>,
}

impl ListView {
    /// Mount a view and take ownership of the save-all registry slot.
    ///
    /// The initial descriptor is published immediately (disabled, no rows);
    /// call [`ListView::refresh`] to load the first row set.
    pub fn mount(
        store: Arc<dyn RecordStorePort>,
        clock: Arc<dyn ClockPort>,
        registry: Arc<SaveAllRegistry>,
        config: ListViewConfig,
    ) -> Arc<Self> {
        let search = config.filter.search_term.clone();
        let view = Arc::new_cyclic(|weak: &Weak<ListView>| {
            let weak = weak.clone();
            let save_all_trigger: SaveAllTrigger = Arc::new(move || {
                let weak = weak.clone();
                async move {
                    if let Some(view) = weak.upgrade() {
                        view.save_all().await;
                    }
                }
                .boxed()
            });
            ListView {
                store,
                clock,
                registry,
                config,
                save_all_trigger,
                state: Mutex::new(ListState {
                    rows: Vec::new(),
                    search,
                    loading: false,
                    saving_all: false,
                    completing_all: false,
                    error: None,
                    generation: 0,
                    unmounted: false,
                }),
            }
        });
        view.publish_registry();
        view
    }

    pub fn config(&self) -> &ListViewConfig {
        &self.config
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let s = self.state.lock().unwrap();
        ListSnapshot {
            rows: s
                .rows
                .iter()
                .map(|r| RowSnapshot {
                    record: r.record.clone(),
                    saving: r.saving,
                    updating: r.updating,
                })
                .collect(),
            loading: s.loading,
            saving_all: s.saving_all,
            completing_all: s.completing_all,
            error: s.error.clone(),
        }
    }

    /// Fetch the row set for the current filter and search term, replacing
    /// whatever is loaded. A result arriving after a newer refresh (or after
    /// unmount) is discarded.
    #[tracing::instrument(name = "list_view.refresh", skip(self), fields(view = %self.config.title))]
    pub async fn refresh(&self) {
        let (generation, query) = {
            let mut s = self.state.lock().unwrap();
            if s.unmounted {
                return;
            }
            s.generation += 1;
            s.loading = true;
            s.error = None;
            let mut filter = self.config.filter.clone();
            filter.search_term = s.search.clone();
            (s.generation, RecordQuery::from(&filter))
        };
        self.publish_registry();

        let result = self.store.query(RECORDS_TABLE, &query).await;

        {
            let mut s = self.state.lock().unwrap();
            if s.unmounted || s.generation != generation {
                // Superseded while in flight; the newer request owns the state.
                return;
            }
            s.loading = false;
            match result {
                Ok(records) => {
                    s.rows = records.into_iter().map(RowState::new).collect();
                }
                Err(err) => {
                    error!(view = %self.config.title, error = %err, "failed to fetch records");
                    s.rows.clear();
                    s.error = Some(err.to_string());
                }
            }
        }
        self.publish_registry();
    }

    /// Update the live search term and re-fetch. An older fetch still in
    /// flight is invalidated by the generation bump inside [`refresh`].
    ///
    /// [`refresh`]: ListView::refresh
    pub async fn set_search(&self, term: &str) {
        {
            let mut s = self.state.lock().unwrap();
            if s.unmounted {
                return;
            }
            s.search = term.to_string();
        }
        self.refresh().await;
    }

    /// Edit one text field of a loaded row in memory. Nothing is written to
    /// the store until an explicit save; empty text is a valid value.
    pub fn edit_field(&self, id: &RecordId, field: RecordField, value: &str) -> bool {
        let mut s = self.state.lock().unwrap();
        let Some(row) = s.rows.iter_mut().find(|r| r.record.id == *id) else {
            return false;
        };
        match field {
            RecordField::Abbreviation => row.record.abbreviation = value.to_string(),
            RecordField::LongForm => row.record.long_form = value.to_string(),
            RecordField::Sentence => row.record.sentence = value.to_string(),
        }
        true
    }

    /// Persist one row's edited content. On failure the row and its edit
    /// buffer stay untouched so the user can retry.
    #[tracing::instrument(name = "list_view.save_row", skip(self), fields(record_id = %id))]
    pub async fn save_row(&self, id: &RecordId) -> bool {
        let patch = {
            let mut s = self.state.lock().unwrap();
            if s.unmounted || s.saving_all {
                return false;
            }
            let Some(row) = s.rows.iter_mut().find(|r| r.record.id == *id) else {
                return false;
            };
            if row.saving {
                return false;
            }
            row.saving = true;
            RecordPatch::content(
                &row.record.abbreviation,
                &row.record.long_form,
                &row.record.sentence,
            )
            .with_updated_at(self.clock.now())
        };

        let result = self.store.update(RECORDS_TABLE, id, &patch).await;

        {
            let mut s = self.state.lock().unwrap();
            if let Some(row) = s.rows.iter_mut().find(|r| r.record.id == *id) {
                row.saving = false;
            }
        }
        if let Err(err) = &result {
            error!(record_id = %id, error = %err, "failed to save record");
        }
        result.is_ok()
    }

    /// Flip the completion flag of one row. The row leaves this view on
    /// success since it no longer matches the filter.
    pub async fn toggle_completed(&self, id: &RecordId) -> bool {
        if !self.config.capabilities.toggle_completed {
            return false;
        }
        let Some(view_completed) = self.config.filter.completed else {
            return false;
        };
        let patch = RecordPatch::default()
            .with_completed(!view_completed)
            .with_updated_at(self.clock.now());
        self.transition_row(id, patch, "toggle completion").await
    }

    /// Soft-delete one row.
    pub async fn move_to_deleted(&self, id: &RecordId) -> bool {
        if !self.config.capabilities.move_to_deleted {
            return false;
        }
        let patch = RecordPatch::default()
            .with_deleted(true)
            .with_updated_at(self.clock.now());
        self.transition_row(id, patch, "move to deleted").await
    }

    /// Clear both review flags of a soft-deleted row; it reappears in the
    /// not-completed view on that view's next fetch.
    pub async fn restore(&self, id: &RecordId) -> bool {
        if !self.config.capabilities.restore {
            return false;
        }
        let patch = RecordPatch::default()
            .with_deleted(false)
            .with_completed(false)
            .with_updated_at(self.clock.now());
        self.transition_row(id, patch, "restore").await
    }

    /// Persist every loaded row concurrently. Failures are logged per row
    /// and never abort the sibling saves; the collection-level flag clears
    /// only after all of them settle.
    #[tracing::instrument(name = "list_view.save_all", skip(self), fields(view = %self.config.title))]
    pub async fn save_all(&self) {
        let jobs: Vec<(RecordId, RecordPatch)> = {
            let mut s = self.state.lock().unwrap();
            if s.unmounted || s.saving_all || s.rows.is_empty() {
                return;
            }
            s.saving_all = true;
            let now = self.clock.now();
            s.rows
                .iter()
                .map(|r| {
                    (
                        r.record.id.clone(),
                        RecordPatch::content(
                            &r.record.abbreviation,
                            &r.record.long_form,
                            &r.record.sentence,
                        )
                        .with_updated_at(now),
                    )
                })
                .collect()
        };
        self.publish_registry();

        let updates = jobs.into_iter().map(|(id, patch)| {
            let store = Arc::clone(&self.store);
            async move {
                match store.update(RECORDS_TABLE, &id, &patch).await {
                    Ok(()) => true,
                    Err(err) => {
                        error!(record_id = %id, error = %err, "bulk save failed for record");
                        false
                    }
                }
            }
        });
        let results = join_all(updates).await;
        let failed = results.iter().filter(|ok| !**ok).count();
        if failed > 0 {
            warn!(view = %self.config.title, failed, "bulk save finished with failures");
        }

        {
            let mut s = self.state.lock().unwrap();
            s.saving_all = false;
        }
        self.publish_registry();
    }

    /// Mark every loaded row completed in one batch store call. Success
    /// empties the view; failure leaves every row untouched.
    #[tracing::instrument(name = "list_view.complete_all", skip(self), fields(view = %self.config.title))]
    pub async fn complete_all(&self) -> bool {
        if !self.config.capabilities.complete_all {
            return false;
        }
        let ids: Vec<RecordId> = {
            let mut s = self.state.lock().unwrap();
            if s.unmounted || s.completing_all || s.rows.is_empty() {
                return false;
            }
            s.completing_all = true;
            s.rows.iter().map(|r| r.record.id.clone()).collect()
        };

        let patch = RecordPatch::default()
            .with_completed(true)
            .with_updated_at(self.clock.now());
        let result = self.store.update_many(RECORDS_TABLE, &ids, &patch).await;

        let cleared = {
            let mut s = self.state.lock().unwrap();
            s.completing_all = false;
            if result.is_ok() && !s.unmounted {
                s.rows.clear();
                true
            } else {
                false
            }
        };
        if let Err(err) = &result {
            error!(count = ids.len(), error = %err, "failed to complete all records");
        }
        if cleared {
            self.publish_registry();
        }
        result.is_ok()
    }

    /// Release the registry slot. In-flight fetches become stale and any
    /// operation still running will no longer publish; the neutral
    /// placeholder is restored unconditionally.
    pub fn unmount(&self) {
        {
            let mut s = self.state.lock().unwrap();
            s.unmounted = true;
            s.generation += 1;
        }
        self.registry.reset();
    }

    fn publish_registry(&self) {
        let (has_rows, disabled, label) = {
            let s = self.state.lock().unwrap();
            if s.unmounted {
                return;
            }
            let has_rows = !s.rows.is_empty();
            (
                has_rows,
                s.saving_all || s.loading || !has_rows,
                if s.saving_all {
                    SAVING_ALL_LABEL
                } else {
                    DEFAULT_SAVE_ALL_LABEL
                },
            )
        };
        let trigger = has_rows.then(|| self.save_all_trigger.clone());
        self.registry.register(
            BulkActionUpdate::new()
                .trigger(trigger)
                .disabled(disabled)
                .label(label),
        );
    }

    async fn transition_row(&self, id: &RecordId, patch: RecordPatch, operation: &'static str) -> bool {
        {
            let mut s = self.state.lock().unwrap();
            if s.unmounted || s.saving_all {
                return false;
            }
            let Some(row) = s.rows.iter_mut().find(|r| r.record.id == *id) else {
                return false;
            };
            if row.updating {
                return false;
            }
            row.updating = true;
        }

        let result = self.store.update(RECORDS_TABLE, id, &patch).await;

        let removed = {
            let mut s = self.state.lock().unwrap();
            match &result {
                Ok(()) => {
                    let before = s.rows.len();
                    s.rows.retain(|r| r.record.id != *id);
                    before != s.rows.len()
                }
                Err(err) => {
                    error!(record_id = %id, operation, error = %err, "row transition failed");
                    if let Some(row) = s.rows.iter_mut().find(|r| r.record.id == *id) {
                        row.updating = false;
                    }
                    false
                }
            }
        };
        if removed {
            self.publish_registry();
        }
        result.is_ok()
    }
}
