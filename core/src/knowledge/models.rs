//! Wire types for the knowledge-base REST API.
//!
//! Listing endpoints wrap their results in a `data` array; the rest of
//! the envelope (pagination cursors and counters) is ignored here.

use serde::{Deserialize, Serialize};

/// Envelope for list endpoints: `{"data": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

/// One dataset (knowledge base) as returned by the dataset listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
}

/// One document as returned by the document listing.
///
/// `name` is the stored name, which for text-created documents carries
/// the `.txt` suffix appended by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

/// Response of the create/update-by-text endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadDocumentResponse {
    pub document: DocumentSummary,
    /// Batch handle used to poll indexing progress for this write.
    pub batch: String,
}

/// Lifecycle of a document inside the service's indexing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingState {
    Waiting,
    Parsing,
    Cleaning,
    Splitting,
    Indexing,
    Paused,
    Completed,
    Error,
    /// Any state this client does not know about. Polling keeps going
    /// until the service reports `completed` or `error`.
    #[serde(other)]
    Unknown,
}

impl IndexingState {
    /// True once the service will not advance this batch any further.
    pub fn is_terminal(self) -> bool {
        matches!(self, IndexingState::Completed | IndexingState::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IndexingState::Waiting => "waiting",
            IndexingState::Parsing => "parsing",
            IndexingState::Cleaning => "cleaning",
            IndexingState::Splitting => "splitting",
            IndexingState::Indexing => "indexing",
            IndexingState::Paused => "paused",
            IndexingState::Completed => "completed",
            IndexingState::Error => "error",
            IndexingState::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IndexingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the indexing-status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexingStatus {
    pub indexing_status: IndexingState,
    #[serde(default)]
    pub completed_segments: u64,
    #[serde(default)]
    pub total_segments: u64,
    /// Error detail reported by the service when `indexing_status` is
    /// `error`.
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn indexing_state_decodes_snake_case() {
        let status: IndexingStatus = serde_json::from_str(
            r#"{"indexing_status":"completed","completed_segments":12,"total_segments":12}"#,
        )
        .unwrap();
        assert_eq!(status.indexing_status, IndexingState::Completed);
        assert_eq!(status.completed_segments, 12);
        assert_eq!(status.total_segments, 12);
        assert_eq!(status.error, None);
    }

    #[test]
    fn unknown_indexing_state_is_not_terminal() {
        let status: IndexingStatus =
            serde_json::from_str(r#"{"indexing_status":"quantizing"}"#).unwrap();
        assert_eq!(status.indexing_status, IndexingState::Unknown);
        assert!(!status.indexing_status.is_terminal());
    }

    #[test]
    fn terminal_states() {
        assert!(IndexingState::Completed.is_terminal());
        assert!(IndexingState::Error.is_terminal());
        assert!(!IndexingState::Indexing.is_terminal());
        assert!(!IndexingState::Waiting.is_terminal());
    }

    #[test]
    fn document_summary_defaults_archived_to_false() {
        let doc: DocumentSummary =
            serde_json::from_str(r#"{"id":"doc-1","name":"users.txt"}"#).unwrap();
        assert!(!doc.archived);
    }

    #[test]
    fn upload_response_carries_batch_handle() {
        let resp: UploadDocumentResponse = serde_json::from_str(
            r#"{"document":{"id":"doc-1","name":"users.txt","archived":false},"batch":"20240520-abc"}"#,
        )
        .unwrap();
        assert_eq!(resp.batch, "20240520-abc");
        assert_eq!(resp.document.id, "doc-1");
    }
}
