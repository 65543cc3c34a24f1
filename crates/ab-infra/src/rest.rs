//! REST adapter for the remote record store.
//!
//! Speaks the PostgREST dialect the managed backend exposes under
//! `/rest/v1/{table}`: `eq.` equality filters, an `or=(...ilike...)` search
//! filter, `order`/`limit` parameters, and `PATCH` with `id=eq.`/`id=in.()`
//! selectors for partial updates. Writes ask for `return=minimal`; the list
//! view re-fetches instead of reading write responses.

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::debug;

use ab_core::ports::{RecordStorePort, StoreError};
use ab_core::{AbbreviationRecord, RecordId, RecordPatch, RecordQuery};

pub struct RestRecordStore {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestRecordStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client for the record store")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    fn filter_params(query: &RecordQuery) -> Vec<(String, String)> {
        let mut params = vec![
            ("select".to_string(), "*".to_string()),
            ("deleted".to_string(), format!("eq.{}", query.deleted)),
        ];
        if let Some(completed) = query.completed {
            params.push(("completed".to_string(), format!("eq.{}", completed)));
        }
        if let Some(term) = &query.search {
            params.push((
                "or".to_string(),
                format!("(abbreviation.ilike.*{term}*,long_form.ilike.*{term}*)"),
            ));
        }
        params.push((
            "order".to_string(),
            "updated_at.desc.nullslast,created_at.desc".to_string(),
        ));
        params.push(("limit".to_string(), query.limit.to_string()));
        params
    }

    async fn send(request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected(reject_message(status, &body)))
    }
}

fn reject_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    }
}

#[async_trait::async_trait]
impl RecordStorePort for RestRecordStore {
    async fn query(
        &self,
        table: &str,
        query: &RecordQuery,
    ) -> Result<Vec<AbbreviationRecord>, StoreError> {
        debug!(table, ?query, "querying record store");
        let request = self
            .authorize(self.http.get(self.endpoint(table)))
            .query(&Self::filter_params(query));
        let response = Self::send(request).await?;
        response
            .json::<Vec<AbbreviationRecord>>()
            .await
            .map_err(|err| StoreError::Rejected(format!("malformed store response: {err}")))
    }

    async fn update(
        &self,
        table: &str,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> Result<(), StoreError> {
        debug!(table, record_id = %id, "updating record");
        let request = self
            .authorize(self.http.patch(self.endpoint(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(patch);
        Self::send(request).await?;
        Ok(())
    }

    async fn update_many(
        &self,
        table: &str,
        ids: &[RecordId],
        patch: &RecordPatch,
    ) -> Result<(), StoreError> {
        debug!(table, count = ids.len(), "batch-updating records");
        let id_list = ids
            .iter()
            .map(|id| format!("\"{id}\""))
            .collect::<Vec<_>>()
            .join(",");
        let request = self
            .authorize(self.http.patch(self.endpoint(table)))
            .query(&[("id", format!("in.({id_list})"))])
            .header("Prefer", "return=minimal")
            .json(patch);
        Self::send(request).await?;
        Ok(())
    }
}
