//! Headless demo session over the three standard pages.
//!
//! Stands in for the browser shell: mounts each page's list view, lets the
//! navigation button pick up the registered save-all action, and prints
//! what a shell would render.

use std::sync::Arc;

use anyhow::Result;

use ab_app::{ListView, ListViewConfig, SaveAllButton, SaveAllRegistry};
use ab_infra::SystemClock;
use abbrboard::{bootstrap, wiring, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_tracing();

    let config = AppConfig::from_env();
    let store = wiring::build_store(&config)?;
    let clock = Arc::new(SystemClock);
    let registry = Arc::new(SaveAllRegistry::new());
    let button = SaveAllButton::new(&registry);

    for page in [
        ListViewConfig::not_completed(),
        ListViewConfig::completed(),
        ListViewConfig::deleted(),
    ] {
        let view = ListView::mount(store.clone(), clock.clone(), registry.clone(), page);
        view.refresh().await;
        render_page(&view, &button);

        // The globally rendered button drives whichever view is mounted.
        if button.view().enabled {
            button.press().await;
        }
        view.unmount();
    }

    Ok(())
}

fn render_page(view: &ListView, button: &SaveAllButton) {
    let config = view.config();
    let snapshot = view.snapshot();
    let action = button.view();

    println!();
    println!("== {} ({})", config.title, snapshot.count_label());
    println!("   {}", config.subtitle);
    println!(
        "   [{}] {}",
        if action.enabled { "enabled" } else { "disabled" },
        action.label
    );
    if let Some(error) = &snapshot.error {
        println!("   Error: {error}");
        return;
    }
    if snapshot.rows.is_empty() {
        println!("   No items to display.");
        return;
    }
    for row in &snapshot.rows {
        let record = &row.record;
        let title = if record.abbreviation.is_empty() {
            "Untitled"
        } else {
            record.abbreviation.as_str()
        };
        println!("   - {} = {}", title, record.long_form);
        if !record.sentence.is_empty() {
            println!("     \"{}\"", record.sentence);
        }
    }
}
