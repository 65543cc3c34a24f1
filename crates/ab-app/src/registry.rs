//! Process-wide registry for the navigation bar's save-all action.
//!
//! Exactly one [`BulkAction`] is live at a time. The currently mounted list
//! view publishes partial updates into it; any number of consumers (the
//! navigation shell, tests) subscribe through a watch channel and observe
//! the merged value. Last writer wins; there is no queuing and no history.
//! On unmount the owning view must restore the neutral descriptor so a
//! removed view cannot leave a dangling handler behind.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;

/// Default label shown when no view owns the action.
pub const DEFAULT_SAVE_ALL_LABEL: &str = "Save all";

/// Label shown while a bulk save is in flight.
pub const SAVING_ALL_LABEL: &str = "Saving all...";

/// Callback owned by the registered list view. Holds only a weak reference
/// to its view, so triggering after the view is gone is a no-op.
pub type SaveAllTrigger = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// The shared trigger/disabled/label tuple driving the navigation button.
#[derive(Clone)]
pub struct BulkAction {
    pub trigger: Option<SaveAllTrigger>,
    pub disabled: bool,
    pub label: String,
}

impl BulkAction {
    /// The placeholder owned by nobody: no trigger, disabled, default label.
    pub fn neutral() -> Self {
        Self {
            trigger: None,
            disabled: true,
            label: DEFAULT_SAVE_ALL_LABEL.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.trigger.is_some() && !self.disabled
    }
}

impl PartialEq for BulkAction {
    fn eq(&self, other: &Self) -> bool {
        let same_trigger = match (&self.trigger, &other.trigger) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_trigger && self.disabled == other.disabled && self.label == other.label
    }
}

impl fmt::Debug for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("trigger", &self.trigger.as_ref().map(|_| "<fn>"))
            .field("disabled", &self.disabled)
            .field("label", &self.label)
            .finish()
    }
}

/// Partial descriptor update; absent fields keep their current value.
#[derive(Clone, Default)]
pub struct BulkActionUpdate {
    trigger: Option<Option<SaveAllTrigger>>,
    disabled: Option<bool>,
    label: Option<String>,
}

impl BulkActionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(mut self, trigger: Option<SaveAllTrigger>) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Holder of the single live [`BulkAction`].
pub struct SaveAllRegistry {
    tx: watch::Sender<BulkAction>,
}

impl SaveAllRegistry {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(BulkAction::neutral());
        Self { tx }
    }

    /// Merge a partial update into the current descriptor and notify
    /// subscribers. Returns whether subscribers were actually woken: a
    /// re-registration that changes nothing observable (same trigger
    /// identity, same flags) is dropped without a notification.
    pub fn register(&self, update: BulkActionUpdate) -> bool {
        self.tx.send_if_modified(|current| {
            let mut next = current.clone();
            if let Some(trigger) = update.trigger {
                next.trigger = trigger;
            }
            if let Some(disabled) = update.disabled {
                next.disabled = disabled;
            }
            if let Some(label) = update.label {
                next.label = label;
            }
            if next == *current {
                return false;
            }
            *current = next;
            true
        })
    }

    /// Unconditionally restore the neutral placeholder. Called by the owning
    /// view on unmount, regardless of what is currently registered.
    pub fn reset(&self) {
        self.register(
            BulkActionUpdate::new()
                .trigger(None)
                .disabled(true)
                .label(DEFAULT_SAVE_ALL_LABEL),
        );
    }

    pub fn current(&self) -> BulkAction {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BulkAction> {
        self.tx.subscribe()
    }
}

impl Default for SaveAllRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn noop_trigger() -> SaveAllTrigger {
        Arc::new(|| async {}.boxed())
    }

    #[test]
    fn test_starts_neutral() {
        let registry = SaveAllRegistry::new();
        let action = registry.current();
        assert!(action.trigger.is_none());
        assert!(action.disabled);
        assert_eq!(action.label, DEFAULT_SAVE_ALL_LABEL);
        assert!(!action.is_enabled());
    }

    #[test]
    fn test_register_merges_partial_updates() {
        let registry = SaveAllRegistry::new();
        registry.register(
            BulkActionUpdate::new()
                .trigger(Some(noop_trigger()))
                .disabled(false)
                .label("Save all"),
        );

        // A label-only update must keep the registered trigger.
        registry.register(BulkActionUpdate::new().label(SAVING_ALL_LABEL));

        let action = registry.current();
        assert!(action.trigger.is_some());
        assert!(!action.disabled);
        assert_eq!(action.label, SAVING_ALL_LABEL);
    }

    #[test]
    fn test_last_writer_wins() {
        let registry = SaveAllRegistry::new();
        let first = noop_trigger();
        let second = noop_trigger();
        registry.register(BulkActionUpdate::new().trigger(Some(first)).disabled(false));
        registry.register(BulkActionUpdate::new().trigger(Some(second.clone())));

        let action = registry.current();
        assert!(Arc::ptr_eq(action.trigger.as_ref().unwrap(), &second));
    }

    #[test]
    fn test_identical_registration_does_not_wake_subscribers() {
        let registry = SaveAllRegistry::new();
        let trigger = noop_trigger();

        let changed = registry.register(
            BulkActionUpdate::new()
                .trigger(Some(trigger.clone()))
                .disabled(false)
                .label("Save all"),
        );
        assert!(changed);

        let mut rx = registry.subscribe();
        rx.mark_unchanged();

        // Same trigger identity, same flags: nothing observable changes.
        let changed = registry.register(
            BulkActionUpdate::new()
                .trigger(Some(trigger))
                .disabled(false)
                .label("Save all"),
        );
        assert!(!changed);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_reset_restores_neutral_state() {
        let registry = SaveAllRegistry::new();
        registry.register(
            BulkActionUpdate::new()
                .trigger(Some(noop_trigger()))
                .disabled(false)
                .label(SAVING_ALL_LABEL),
        );

        registry.reset();

        let action = registry.current();
        assert!(action.trigger.is_none());
        assert!(action.disabled);
        assert_eq!(action.label, DEFAULT_SAVE_ALL_LABEL);
    }
}
