//! Raw REST client for the knowledge-base service.
//!
//! One method per endpoint, no reconciliation logic here; that lives in
//! [`crate::knowledge::sync`]. All methods need a bearer token, so
//! construction fails fast when no API key is configured.

use serde::de::DeserializeOwned;

use crate::config::{authorize_hint, ServiceConfig};
use crate::error::{ConfigError, SyncError, SyncResult};
use crate::knowledge::models::{
    Dataset, DocumentSummary, IndexingStatus, ListResponse, UploadDocumentResponse,
};
use crate::knowledge::payloads::DocumentPayload;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Page size for listing endpoints. One page is all this client ever
/// fetches; name lookups are narrowed with the `keyword` filter instead
/// of pagination.
pub const LIST_PAGE_LIMIT: u32 = 100;

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> SyncResult<T> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| SyncError::transport(&url, err))?;

    if !status.is_success() {
        return Err(SyncError::Status {
            status: status.as_u16(),
            url,
            body: preview_body(&body),
        });
    }

    serde_json::from_str::<T>(&body).map_err(|err| SyncError::Decode {
        status: status.as_u16(),
        url,
        detail: format!("{} | body={}", err, preview_body(&body)),
    })
}

async fn ensure_success(resp: reqwest::Response) -> SyncResult<()> {
    let status = resp.status();
    let url = resp.url().to_string();

    if status.is_success() {
        return Ok(());
    }

    let body = resp
        .text()
        .await
        .map_err(|err| SyncError::transport(&url, err))?;
    Err(SyncError::Status {
        status: status.as_u16(),
        url,
        body: preview_body(&body),
    })
}

#[derive(Clone, Debug)]
pub struct KnowledgeClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl KnowledgeClient {
    pub fn new(cfg: &ServiceConfig) -> Result<Self, ConfigError> {
        if cfg.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey {
                authorize_url: authorize_hint(&cfg.base_url),
            });
        }
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()?;
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.api_key)
    }

    /// First page of the dataset listing.
    pub async fn list_datasets(&self) -> SyncResult<Vec<Dataset>> {
        let url = self.url("/datasets");
        tracing::debug!(target: "firedrop.http", stage = "datasets.list.in", url = %url);
        let req = self
            .http
            .get(&url)
            .query(&[("limit", LIST_PAGE_LIMIT.to_string())]);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| SyncError::transport(&url, err))?;
        let status = resp.status();
        let page: ListResponse<Dataset> = parse_json(resp).await?;
        tracing::debug!(
            target: "firedrop.http",
            stage = "datasets.list.out",
            status = %status,
            count = page.data.len()
        );
        Ok(page.data)
    }

    pub async fn create_dataset(&self, name: &str) -> SyncResult<Dataset> {
        let url = self.url("/datasets");
        tracing::debug!(target: "firedrop.http", stage = "datasets.create.in", url = %url, name = %name);
        let req = self.http.post(&url).json(&serde_json::json!({ "name": name }));
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| SyncError::transport(&url, err))?;
        let status = resp.status();
        let dataset: Dataset = parse_json(resp).await?;
        tracing::debug!(
            target: "firedrop.http",
            stage = "datasets.create.out",
            status = %status,
            id = %dataset.id
        );
        Ok(dataset)
    }

    /// First page of the document listing, optionally narrowed by the
    /// service-side `keyword` substring filter.
    pub async fn list_documents(
        &self,
        dataset_id: &str,
        keyword: Option<&str>,
    ) -> SyncResult<Vec<DocumentSummary>> {
        let url = self.url(&format!("/datasets/{dataset_id}/documents"));
        tracing::debug!(
            target: "firedrop.http",
            stage = "documents.list.in",
            url = %url,
            keyword = keyword.unwrap_or("")
        );
        let mut query = vec![("limit", LIST_PAGE_LIMIT.to_string())];
        if let Some(keyword) = keyword {
            query.push(("keyword", keyword.to_string()));
        }
        let req = self.http.get(&url).query(&query);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| SyncError::transport(&url, err))?;
        let status = resp.status();
        let page: ListResponse<DocumentSummary> = parse_json(resp).await?;
        tracing::debug!(
            target: "firedrop.http",
            stage = "documents.list.out",
            status = %status,
            count = page.data.len()
        );
        Ok(page.data)
    }

    pub async fn create_document_by_text(
        &self,
        dataset_id: &str,
        payload: &DocumentPayload,
    ) -> SyncResult<UploadDocumentResponse> {
        let url = self.url(&format!("/datasets/{dataset_id}/document/create_by_text"));
        tracing::debug!(
            target: "firedrop.http",
            stage = "documents.create.in",
            url = %url,
            name = %payload.name,
            text_len = payload.text.len()
        );
        let req = self.http.post(&url).json(payload);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| SyncError::transport(&url, err))?;
        let status = resp.status();
        let out: UploadDocumentResponse = parse_json(resp).await?;
        tracing::debug!(
            target: "firedrop.http",
            stage = "documents.create.out",
            status = %status,
            id = %out.document.id,
            batch = %out.batch
        );
        Ok(out)
    }

    pub async fn update_document_by_text(
        &self,
        dataset_id: &str,
        document_id: &str,
        payload: &DocumentPayload,
    ) -> SyncResult<UploadDocumentResponse> {
        let url = self.url(&format!(
            "/datasets/{dataset_id}/documents/{document_id}/update_by_text"
        ));
        tracing::debug!(
            target: "firedrop.http",
            stage = "documents.update.in",
            url = %url,
            name = %payload.name,
            text_len = payload.text.len()
        );
        let req = self.http.post(&url).json(payload);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| SyncError::transport(&url, err))?;
        let status = resp.status();
        let out: UploadDocumentResponse = parse_json(resp).await?;
        tracing::debug!(
            target: "firedrop.http",
            stage = "documents.update.out",
            status = %status,
            id = %out.document.id,
            batch = %out.batch
        );
        Ok(out)
    }

    pub async fn delete_document(&self, dataset_id: &str, document_id: &str) -> SyncResult<()> {
        let url = self.url(&format!("/datasets/{dataset_id}/documents/{document_id}"));
        tracing::debug!(target: "firedrop.http", stage = "documents.delete.in", url = %url);
        let resp = self
            .auth(self.http.delete(&url))
            .send()
            .await
            .map_err(|err| SyncError::transport(&url, err))?;
        let status = resp.status();
        ensure_success(resp).await?;
        tracing::debug!(
            target: "firedrop.http",
            stage = "documents.delete.out",
            status = %status
        );
        Ok(())
    }

    /// Indexing progress for one write batch. The endpoint wraps its
    /// answer in a one-element `data` array; an empty array is treated
    /// as a decode failure rather than "still waiting", so a poll loop
    /// on top of this cannot spin forever on a malformed answer.
    pub async fn indexing_status(&self, dataset_id: &str, batch: &str) -> SyncResult<IndexingStatus> {
        let url = self.url(&format!("/datasets/{dataset_id}/documents/{batch}/indexing-status"));
        tracing::debug!(target: "firedrop.http", stage = "indexing.status.in", url = %url);
        let resp = self
            .auth(self.http.get(&url))
            .send()
            .await
            .map_err(|err| SyncError::transport(&url, err))?;
        let status = resp.status();
        let page: ListResponse<IndexingStatus> = parse_json(resp).await?;
        let entry = page.data.into_iter().next().ok_or_else(|| SyncError::Decode {
            status: status.as_u16(),
            url: url.clone(),
            detail: "indexing-status returned an empty data array".to_string(),
        })?;
        tracing::debug!(
            target: "firedrop.http",
            stage = "indexing.status.out",
            status = %status,
            state = %entry.indexing_status,
            completed = entry.completed_segments,
            total = entry.total_segments
        );
        Ok(entry)
    }
}
