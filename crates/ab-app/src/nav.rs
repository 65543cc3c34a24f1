//! Navigation-bar model for the globally rendered save-all button.

use crate::registry::{BulkAction, SaveAllRegistry, DEFAULT_SAVE_ALL_LABEL};
use tokio::sync::watch;

/// Render state of the save-all control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub enabled: bool,
}

/// The navigation shell's handle on the registry.
///
/// Whatever list view currently owns the registry drives this button; the
/// shell itself knows nothing about list views.
pub struct SaveAllButton {
    rx: watch::Receiver<BulkAction>,
}

impl SaveAllButton {
    pub fn new(registry: &SaveAllRegistry) -> Self {
        Self {
            rx: registry.subscribe(),
        }
    }

    pub fn view(&self) -> ButtonView {
        let action = self.rx.borrow();
        let label = if action.label.is_empty() {
            DEFAULT_SAVE_ALL_LABEL.to_string()
        } else {
            action.label.clone()
        };
        ButtonView {
            label,
            enabled: action.is_enabled(),
        }
    }

    /// Run the currently registered trigger. A press with no trigger or a
    /// disabled descriptor is a no-op.
    pub async fn press(&self) {
        let trigger = {
            let action = self.rx.borrow();
            if action.is_enabled() {
                action.trigger.clone()
            } else {
                None
            }
        };
        if let Some(trigger) = trigger {
            trigger().await;
        }
    }

    /// Wait for the next descriptor change. Returns false once the registry
    /// is gone (no further changes will arrive).
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BulkActionUpdate;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_view_reflects_registry_state() {
        let registry = SaveAllRegistry::new();
        let button = SaveAllButton::new(&registry);

        assert_eq!(
            button.view(),
            ButtonView {
                label: "Save all".to_string(),
                enabled: false,
            }
        );

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        registry.register(
            BulkActionUpdate::new()
                .trigger(Some(Arc::new(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }
                    .boxed()
                })))
                .disabled(false),
        );

        assert!(button.view().enabled);
        button.press().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_press_is_noop_when_disabled() {
        let registry = SaveAllRegistry::new();
        let button = SaveAllButton::new(&registry);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        registry.register(
            BulkActionUpdate::new()
                .trigger(Some(Arc::new(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }
                    .boxed()
                })))
                .disabled(true),
        );

        button.press().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        registry.reset();
        button.press().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
