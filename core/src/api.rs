//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `firedrop_core::api` instead of reaching into
//! internal modules.

pub use crate::config::{
    authorize_hint, load_default, load_from, AppConfig, LoggingConfig, SegmentationConfig,
    ServiceConfig, CONFIG_FILE, ENV_API_KEY, ENV_BASE_URL, ENV_SEPARATOR,
};
pub use crate::error::{ConfigError, SyncError, SyncResult};
pub use crate::knowledge::{
    build_document_payload, stored_name, CardAction, CardOutcome, Dataset, DocumentPayload,
    DocumentSummary, IndexingState, IndexingStatus, KnowledgeCards, KnowledgeClient, PushOptions,
    SyncService, UploadDocumentResponse, WipeReport, STORED_SUFFIX,
};
pub use crate::progress::{IndexingTicker, SyncProgress};
