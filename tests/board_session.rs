//! End-to-end session tests: list views, registry, and navigation button
//! over the in-memory record store.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use ab_app::{ListView, ListViewConfig, SaveAllButton, SaveAllRegistry};
use ab_core::ports::ClockPort;
use ab_core::{AbbreviationRecord, RecordField, RECORDS_TABLE};
use ab_infra::InMemoryRecordStore;

struct FixedClock(DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn save_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

fn created(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()
}

struct Session {
    store: Arc<InMemoryRecordStore>,
    clock: Arc<FixedClock>,
    registry: Arc<SaveAllRegistry>,
    button: SaveAllButton,
}

impl Session {
    fn new(records: Vec<AbbreviationRecord>) -> Self {
        let store = Arc::new(InMemoryRecordStore::seeded(RECORDS_TABLE, records));
        let registry = Arc::new(SaveAllRegistry::new());
        let button = SaveAllButton::new(&registry);
        Self {
            store,
            clock: Arc::new(FixedClock(save_time())),
            registry,
            button,
        }
    }

    async fn open(&self, config: ListViewConfig) -> Arc<ListView> {
        let view = ListView::mount(
            self.store.clone(),
            self.clock.clone(),
            self.registry.clone(),
            config,
        );
        view.refresh().await;
        view
    }
}

#[tokio::test]
async fn test_search_matches_abbreviation_or_long_form() {
    let session = Session::new(vec![
        AbbreviationRecord::new("HTTP", "Hypertext Transfer Protocol", "", created(1)),
        AbbreviationRecord::new("FTP", "HTTP tunneling", "", created(2)),
        AbbreviationRecord::new("SSH", "Secure Shell", "", created(3)),
    ]);

    let view = session.open(ListViewConfig::not_completed()).await;
    view.set_search("HTTP").await;

    let abbrs: Vec<String> = view
        .snapshot()
        .rows
        .iter()
        .map(|r| r.record.abbreviation.clone())
        .collect();
    assert_eq!(abbrs, vec!["FTP".to_string(), "HTTP".to_string()]);
    view.unmount();
}

#[tokio::test]
async fn test_nav_button_saves_every_loaded_row() {
    let session = Session::new(vec![
        AbbreviationRecord::new("API", "", "", created(1)),
        AbbreviationRecord::new("TLS", "", "", created(2)),
    ]);

    let view = session.open(ListViewConfig::not_completed()).await;
    for row in &view.snapshot().rows {
        let id = &row.record.id;
        view.edit_field(
            id,
            RecordField::LongForm,
            &format!("{} expanded", row.record.abbreviation),
        );
    }

    assert!(session.button.view().enabled);
    session.button.press().await;

    for record in session.store.records(RECORDS_TABLE) {
        assert_eq!(
            record.long_form,
            format!("{} expanded", record.abbreviation)
        );
        assert_eq!(record.updated_at, Some(save_time()));
    }
    // The bulk flag has settled and the button is usable again.
    assert_eq!(session.button.view().label, "Save all");
    assert!(session.button.view().enabled);
    view.unmount();
}

#[tokio::test]
async fn test_complete_all_moves_rows_to_completed_view() {
    let session = Session::new(vec![
        AbbreviationRecord::new("API", "", "", created(1)),
        AbbreviationRecord::new("TLS", "", "", created(2)),
    ]);

    let view = session.open(ListViewConfig::not_completed()).await;
    assert!(view.complete_all().await);
    assert!(view.snapshot().rows.is_empty());
    assert!(!session.button.view().enabled);
    view.unmount();

    let completed = session.open(ListViewConfig::completed()).await;
    assert_eq!(completed.snapshot().rows.len(), 2);
    completed.unmount();
}

#[tokio::test]
async fn test_delete_and_restore_round_trip() {
    let session = Session::new(vec![AbbreviationRecord::new(
        "API",
        "Application Programming Interface",
        "",
        created(1),
    )]);

    let view = session.open(ListViewConfig::not_completed()).await;
    let id = view.snapshot().rows[0].record.id.clone();
    assert!(view.move_to_deleted(&id).await);
    assert!(view.snapshot().rows.is_empty());
    view.unmount();

    let deleted = session.open(ListViewConfig::deleted()).await;
    assert_eq!(deleted.snapshot().rows.len(), 1);
    // The deleted page offers restore and nothing else.
    assert!(!deleted.toggle_completed(&id).await);
    assert!(deleted.restore(&id).await);
    assert!(deleted.snapshot().rows.is_empty());
    deleted.unmount();

    let back = session.open(ListViewConfig::not_completed()).await;
    let rows = back.snapshot().rows;
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].record.completed);
    assert!(!rows[0].record.deleted);
    back.unmount();
}

#[tokio::test]
async fn test_unmount_returns_button_to_neutral() {
    let session = Session::new(vec![AbbreviationRecord::new("API", "", "", created(1))]);

    let view = session.open(ListViewConfig::not_completed()).await;
    assert!(session.button.view().enabled);
    view.unmount();

    let button_view = session.button.view();
    assert!(!button_view.enabled);
    assert_eq!(button_view.label, "Save all");
    assert!(session.registry.current().trigger.is_none());

    // Pressing the neutral button must not reach the store.
    let before = session.store.records(RECORDS_TABLE);
    session.button.press().await;
    assert_eq!(session.store.records(RECORDS_TABLE), before);
}
