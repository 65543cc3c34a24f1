//! View filters and the record queries derived from them.

use std::cmp::Ordering;

use crate::record::AbbreviationRecord;

/// Hard cap on fetched rows. There is no pagination beyond this.
pub const MAX_FETCH_ROWS: usize = 500;

/// Selects which records a list view shows.
///
/// `completed` is absent for views that do not partition on the completion
/// flag (the deleted page). Derived from the active page plus live search
/// input; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFilter {
    pub completed: Option<bool>,
    pub deleted: bool,
    pub search_term: String,
}

impl ViewFilter {
    /// Entries that still need review.
    pub fn not_completed() -> Self {
        Self {
            completed: Some(false),
            deleted: false,
            search_term: String::new(),
        }
    }

    /// Reviewed entries marked as completed.
    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            deleted: false,
            search_term: String::new(),
        }
    }

    /// Soft-deleted entries.
    pub fn deleted() -> Self {
        Self {
            completed: None,
            deleted: true,
            search_term: String::new(),
        }
    }

    pub fn with_search(mut self, term: &str) -> Self {
        self.search_term = term.to_string();
        self
    }
}

/// Concrete store query built from a [`ViewFilter`].
///
/// The completion filter only applies on non-deleted views, and the search
/// term is trimmed before use; an all-whitespace term means no search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub deleted: bool,
    pub completed: Option<bool>,
    pub search: Option<String>,
    pub limit: usize,
}

impl From<&ViewFilter> for RecordQuery {
    fn from(filter: &ViewFilter) -> Self {
        let term = filter.search_term.trim();
        Self {
            deleted: filter.deleted,
            completed: if filter.deleted { None } else { filter.completed },
            search: if term.is_empty() {
                None
            } else {
                Some(term.to_string())
            },
            limit: MAX_FETCH_ROWS,
        }
    }
}

impl RecordQuery {
    /// Whether a record satisfies the equality and search predicates.
    pub fn matches(&self, record: &AbbreviationRecord) -> bool {
        if record.deleted != self.deleted {
            return false;
        }
        if let Some(completed) = self.completed {
            if record.completed != completed {
                return false;
            }
        }
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                record.abbreviation.to_lowercase().contains(&term)
                    || record.long_form.to_lowercase().contains(&term)
            }
        }
    }
}

/// Result ordering for every list view fetch: last-updated first with
/// never-updated records at the end, ties broken by newest creation.
pub fn view_order(a: &AbbreviationRecord, b: &AbbreviationRecord) -> Ordering {
    match (a.updated_at, b.updated_at) {
        (Some(ua), Some(ub)) => ub.cmp(&ua).then_with(|| b.created_at.cmp(&a.created_at)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    }
}
