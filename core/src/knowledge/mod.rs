//! Knowledge-base sync: REST client, wire models and the reconciler.

pub mod client;
pub mod models;
pub mod payloads;
pub mod sync;

pub use client::{KnowledgeClient, LIST_PAGE_LIMIT};
pub use models::{
    Dataset, DocumentSummary, IndexingState, IndexingStatus, ListResponse, UploadDocumentResponse,
};
pub use payloads::{build_document_payload, DocumentPayload};
pub use sync::{
    stored_name, CardAction, CardOutcome, KnowledgeCards, PushOptions, SyncService, WipeReport,
    STORED_SUFFIX,
};
