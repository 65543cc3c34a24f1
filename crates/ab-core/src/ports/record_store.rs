use crate::ids::RecordId;
use crate::ports::errors::StoreError;
use crate::query::RecordQuery;
use crate::record::{AbbreviationRecord, RecordPatch};

/// Remote queryable record store.
///
/// Implementations must return query results already filtered, ordered
/// (`updated_at` descending nulls-last, then `created_at` descending) and
/// capped per the query's limit. Updates are partial: only fields present in
/// the patch change.
#[async_trait::async_trait]
pub trait RecordStorePort: Send + Sync {
    async fn query(
        &self,
        table: &str,
        query: &RecordQuery,
    ) -> Result<Vec<AbbreviationRecord>, StoreError>;

    async fn update(
        &self,
        table: &str,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> Result<(), StoreError>;

    /// Partial update of many records by id in one store call.
    async fn update_many(
        &self,
        table: &str,
        ids: &[RecordId],
        patch: &RecordPatch,
    ) -> Result<(), StoreError>;
}
