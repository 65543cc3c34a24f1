//! The abbreviation record model and partial-update patches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// Store table holding the abbreviation records.
pub const RECORDS_TABLE: &str = "abbreviations";

/// One abbreviation entry with its review-state flags.
///
/// `deleted` is a soft-delete marker, not physical removal. `updated_at` is
/// absent until the record is first mutated through the list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbbreviationRecord {
    pub id: RecordId,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub long_form: String,
    #[serde(default)]
    pub sentence: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AbbreviationRecord {
    /// A fresh, not-yet-reviewed record. Used by seeds and tests; real
    /// records are created by the store backend.
    pub fn new(abbreviation: &str, long_form: &str, sentence: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(),
            abbreviation: abbreviation.to_string(),
            long_form: long_form.to_string(),
            sentence: sentence.to_string(),
            completed: false,
            deleted: false,
            created_at,
            updated_at: None,
        }
    }
}

/// The three locally editable text fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Abbreviation,
    LongForm,
    Sentence,
}

/// Partial-field update sent to the record store.
///
/// Absent fields are left untouched by the store; the REST adapter relies on
/// the serde representation omitting them from the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RecordPatch {
    /// Patch carrying the three editable text fields of a row save.
    pub fn content(abbreviation: &str, long_form: &str, sentence: &str) -> Self {
        Self {
            abbreviation: Some(abbreviation.to_string()),
            long_form: Some(long_form.to_string()),
            sentence: Some(sentence.to_string()),
            ..Self::default()
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = Some(deleted);
        self
    }

    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Apply the present fields to a record in place.
    pub fn apply_to(&self, record: &mut AbbreviationRecord) {
        if let Some(v) = &self.abbreviation {
            record.abbreviation = v.clone();
        }
        if let Some(v) = &self.long_form {
            record.long_form = v.clone();
        }
        if let Some(v) = &self.sentence {
            record.sentence = v.clone();
        }
        if let Some(v) = self.completed {
            record.completed = v;
        }
        if let Some(v) = self.deleted {
            record.deleted = v;
        }
        if let Some(v) = self.updated_at {
            record.updated_at = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> AbbreviationRecord {
        AbbreviationRecord::new(
            "HTTP",
            "Hypertext Transfer Protocol",
            "HTTP is the foundation of the web.",
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = RecordPatch::default()
            .with_completed(true)
            .with_updated_at(Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap());
        let json = serde_json::to_value(&patch).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["completed"], serde_json::json!(true));
        assert!(obj.contains_key("updated_at"));
    }

    #[test]
    fn test_content_patch_allows_empty_text() {
        // Empty is a valid stored value, not an error.
        let patch = RecordPatch::content("", "", "");
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["abbreviation"], serde_json::json!(""));
    }

    #[test]
    fn test_apply_to_leaves_absent_fields_untouched() {
        let mut rec = record();
        let original_abbr = rec.abbreviation.clone();
        RecordPatch::default().with_deleted(true).apply_to(&mut rec);
        assert!(rec.deleted);
        assert_eq!(rec.abbreviation, original_abbr);
        assert!(rec.updated_at.is_none());
    }

    #[test]
    fn test_restore_patch_clears_both_flags() {
        let mut rec = record();
        rec.completed = true;
        rec.deleted = true;
        RecordPatch::default()
            .with_deleted(false)
            .with_completed(false)
            .apply_to(&mut rec);
        assert!(!rec.deleted);
        assert!(!rec.completed);
    }
}
