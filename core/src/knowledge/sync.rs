//! Reconciles a local set of knowledge cards against a remote dataset.
//!
//! A card is a logical name plus a text body. The service stores each
//! card as one document named `<logical>.txt` (the suffix is appended
//! server-side on text uploads). Pushing a card either creates that
//! document, updates it in place, or, with force override, deletes and
//! recreates it so segmentation settings are re-applied from scratch.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::{AppConfig, SegmentationConfig};
use crate::error::{ConfigError, SyncResult};
use crate::knowledge::client::KnowledgeClient;
use crate::knowledge::models::IndexingState;
use crate::knowledge::payloads::build_document_payload;
use crate::progress::SyncProgress;

/// Suffix the service appends to the stored name of text-created
/// documents.
pub const STORED_SUFFIX: &str = ".txt";

/// Fixed pause between indexing-status polls.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Cards keyed by logical name. The map guarantees one document per
/// name and a deterministic push order.
pub type KnowledgeCards = BTreeMap<String, String>;

/// Stored document name for a logical card name.
pub fn stored_name(logical_name: &str) -> String {
    format!("{logical_name}{STORED_SUFFIX}")
}

/// What happened to one card during a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardAction {
    Created,
    Updated,
    /// Deleted then created again under force override.
    Recreated,
    /// Left untouched after a recoverable failure.
    Skipped,
}

impl CardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CardAction::Created => "created",
            CardAction::Updated => "updated",
            CardAction::Recreated => "recreated",
            CardAction::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for CardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-card result of a push run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CardOutcome {
    pub name: String,
    pub action: CardAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Batch handle of the triggering write, for indexing polls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
}

/// Result of a bulk delete.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct WipeReport {
    pub deleted: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    /// Delete-then-recreate documents that already exist.
    pub force_override: bool,
    /// Poll each write batch until indexing finishes.
    pub watch_indexing: bool,
    /// Render progress bars.
    pub progress: bool,
}

pub struct SyncService {
    client: KnowledgeClient,
    segmentation: SegmentationConfig,
}

impl SyncService {
    pub fn new(cfg: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: KnowledgeClient::new(&cfg.service)?,
            segmentation: cfg.segmentation.clone(),
        })
    }

    pub fn with_client(client: KnowledgeClient, segmentation: SegmentationConfig) -> Self {
        Self {
            client,
            segmentation,
        }
    }

    pub fn client(&self) -> &KnowledgeClient {
        &self.client
    }

    /// Dataset id for `name`, creating the dataset when it does not
    /// exist yet.
    ///
    /// After a create the listing is consulted once more; if the fresh
    /// dataset has not shown up there yet, the id from the create
    /// response is used directly instead of retrying forever.
    pub async fn resolve_dataset(&self, name: &str) -> SyncResult<String> {
        if let Some(id) = self.find_dataset(name).await? {
            tracing::info!(target: "firedrop.sync", dataset = name, id = %id, "resolved dataset");
            return Ok(id);
        }

        tracing::warn!(target: "firedrop.sync", dataset = name, "dataset not found, creating it");
        let created = self.client.create_dataset(name).await?;

        match self.find_dataset(name).await? {
            Some(id) => Ok(id),
            None => {
                tracing::warn!(
                    target: "firedrop.sync",
                    dataset = name,
                    id = %created.id,
                    "created dataset not in listing yet, using create response id"
                );
                Ok(created.id)
            }
        }
    }

    async fn find_dataset(&self, name: &str) -> SyncResult<Option<String>> {
        let datasets = self.client.list_datasets().await?;
        tracing::debug!(
            target: "firedrop.sync",
            dataset = name,
            scanned = datasets.len(),
            "scanning dataset listing"
        );
        // Exact name match; on duplicates the first listed wins.
        Ok(datasets.into_iter().find(|d| d.name == name).map(|d| d.id))
    }

    /// Document id for a logical card name, or None when the card has
    /// no stored document yet.
    ///
    /// The service-side keyword filter narrows the listing, then the
    /// stored name (`<logical>.txt`) is matched exactly so `users`
    /// never hits `users_archive.txt`.
    pub async fn find_document(
        &self,
        dataset_id: &str,
        logical_name: &str,
    ) -> SyncResult<Option<String>> {
        let stored = stored_name(logical_name);
        let docs = self
            .client
            .list_documents(dataset_id, Some(logical_name))
            .await?;
        Ok(docs.into_iter().find(|d| d.name == stored).map(|d| d.id))
    }

    /// Push every card into the named dataset. Returns one outcome per
    /// card, in card order.
    ///
    /// An empty card set is reported and skipped without touching the
    /// service. A card whose update is rejected by the service (an
    /// archived document, typically) is skipped; transport failures and
    /// rejected creates or deletes abort the run.
    pub async fn push(
        &self,
        dataset_name: &str,
        cards: &KnowledgeCards,
        opts: &PushOptions,
    ) -> SyncResult<Vec<CardOutcome>> {
        if cards.is_empty() {
            tracing::error!(
                target: "firedrop.sync",
                dataset = dataset_name,
                "no cards to push, check the input files"
            );
            return Ok(Vec::new());
        }

        let dataset_id = self.resolve_dataset(dataset_name).await?;
        let progress = SyncProgress::new(cards.len(), opts.progress);
        let mut outcomes = Vec::with_capacity(cards.len());

        for (name, text) in cards {
            progress.start_card(name);
            let outcome = self.push_card(&dataset_id, name, text, opts.force_override).await?;
            if opts.watch_indexing {
                if let Some(batch) = outcome.batch.as_deref() {
                    self.watch_indexing(&dataset_id, batch, &progress).await?;
                }
            }
            progress.finish_card(name);
            outcomes.push(outcome);
        }

        progress.finish(true);
        let skipped = outcomes
            .iter()
            .filter(|o| o.action == CardAction::Skipped)
            .count();
        tracing::info!(
            target: "firedrop.sync",
            dataset = dataset_name,
            cards = outcomes.len(),
            skipped = skipped,
            "push finished"
        );
        Ok(outcomes)
    }

    async fn push_card(
        &self,
        dataset_id: &str,
        name: &str,
        text: &str,
        force_override: bool,
    ) -> SyncResult<CardOutcome> {
        let payload = build_document_payload(name, text, &self.segmentation);

        let existing = self.find_document(dataset_id, name).await?;
        match existing {
            Some(document_id) if force_override => {
                self.client.delete_document(dataset_id, &document_id).await?;
                let resp = self.client.create_document_by_text(dataset_id, &payload).await?;
                tracing::info!(
                    target: "firedrop.sync",
                    card = name,
                    old_id = %document_id,
                    new_id = %resp.document.id,
                    "recreated document"
                );
                Ok(CardOutcome {
                    name: name.to_string(),
                    action: CardAction::Recreated,
                    document_id: Some(resp.document.id),
                    batch: Some(resp.batch),
                })
            }
            Some(document_id) => {
                match self
                    .client
                    .update_document_by_text(dataset_id, &document_id, &payload)
                    .await
                {
                    Ok(resp) => {
                        tracing::info!(
                            target: "firedrop.sync",
                            card = name,
                            id = %document_id,
                            "updated document"
                        );
                        Ok(CardOutcome {
                            name: name.to_string(),
                            action: CardAction::Updated,
                            document_id: Some(resp.document.id),
                            batch: Some(resp.batch),
                        })
                    }
                    // The service rejects updates to archived documents
                    // with a status error. Skip the card, keep the run
                    // going; the document list stays as it was.
                    Err(err) if err.is_status() => {
                        tracing::error!(
                            target: "firedrop.sync",
                            card = name,
                            id = %document_id,
                            error = %err,
                            "update rejected, skipping card"
                        );
                        Ok(CardOutcome {
                            name: name.to_string(),
                            action: CardAction::Skipped,
                            document_id: None,
                            batch: None,
                        })
                    }
                    Err(err) => Err(err),
                }
            }
            None => {
                let resp = self.client.create_document_by_text(dataset_id, &payload).await?;
                tracing::info!(
                    target: "firedrop.sync",
                    card = name,
                    id = %resp.document.id,
                    "created document"
                );
                Ok(CardOutcome {
                    name: name.to_string(),
                    action: CardAction::Created,
                    document_id: Some(resp.document.id),
                    batch: Some(resp.batch),
                })
            }
        }
    }

    /// Poll one write batch until the service reports a terminal state.
    /// No timeout of its own; the per-request timeout still applies to
    /// each poll.
    pub async fn await_indexing(&self, dataset_id: &str, batch: &str) -> SyncResult<IndexingState> {
        self.watch_indexing(dataset_id, batch, &SyncProgress::disabled())
            .await
    }

    async fn watch_indexing(
        &self,
        dataset_id: &str,
        batch: &str,
        progress: &SyncProgress,
    ) -> SyncResult<IndexingState> {
        let ticker = progress.indexing_bar();
        loop {
            let status = self.client.indexing_status(dataset_id, batch).await?;
            ticker.update(
                status.completed_segments,
                status.total_segments,
                status.indexing_status,
            );

            if status.indexing_status.is_terminal() {
                ticker.finish(status.indexing_status);
                if status.indexing_status == IndexingState::Error {
                    tracing::error!(
                        target: "firedrop.sync",
                        batch = batch,
                        detail = status.error.as_deref().unwrap_or("unknown"),
                        "indexing failed"
                    );
                } else {
                    tracing::info!(
                        target: "firedrop.sync",
                        batch = batch,
                        segments = status.total_segments,
                        "indexing completed"
                    );
                }
                return Ok(status.indexing_status);
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Delete every document in the named dataset, best effort. A
    /// rejected delete is counted and logged; the sweep moves on to the
    /// next document. Transport failures abort.
    pub async fn delete_all(&self, dataset_name: &str) -> SyncResult<WipeReport> {
        let dataset_id = self.resolve_dataset(dataset_name).await?;
        let docs = self.client.list_documents(&dataset_id, None).await?;

        let mut report = WipeReport {
            deleted: 0,
            failed: 0,
        };
        for doc in &docs {
            match self.client.delete_document(&dataset_id, &doc.id).await {
                Ok(()) => {
                    tracing::debug!(
                        target: "firedrop.sync",
                        document = %doc.name,
                        id = %doc.id,
                        "deleted document"
                    );
                    report.deleted += 1;
                }
                Err(err) if err.is_status() => {
                    tracing::warn!(
                        target: "firedrop.sync",
                        document = %doc.name,
                        id = %doc.id,
                        error = %err,
                        "failed to delete document"
                    );
                    report.failed += 1;
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!(
            target: "firedrop.sync",
            dataset = dataset_name,
            found = docs.len(),
            deleted = report.deleted,
            failed = report.failed,
            "bulk delete finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_appends_suffix() {
        assert_eq!(stored_name("users"), "users.txt");
        assert_eq!(stored_name("user data"), "user data.txt");
    }

    #[test]
    fn stored_name_treats_existing_suffix_as_part_of_the_name() {
        // Logical names are suffix-free by construction; a name that
        // happens to end in .txt still gets the stored suffix appended.
        assert_eq!(stored_name("notes.txt"), "notes.txt.txt");
    }

    #[test]
    fn card_outcome_serializes_without_empty_fields() {
        let outcome = CardOutcome {
            name: "users".to_string(),
            action: CardAction::Skipped,
            document_id: None,
            batch: None,
        };
        let v = serde_json::to_value(&outcome).unwrap();
        assert_eq!(v, serde_json::json!({"name": "users", "action": "skipped"}));
    }
}
