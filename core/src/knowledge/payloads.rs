//! Request payloads for document writes.

use serde::Serialize;

use crate::config::SegmentationConfig;

/// Body of the create-by-text and update-by-text endpoints.
///
/// `name` is the logical card name without suffix; the service appends
/// `.txt` to the stored document name on its own.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentPayload {
    pub name: String,
    pub text: String,
    pub indexing_technique: &'static str,
    pub process_rule: ProcessRule,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessRule {
    pub mode: &'static str,
    pub rules: ProcessRules,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessRules {
    pub pre_processing_rules: Vec<PreProcessingRule>,
    pub segmentation: Segmentation,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreProcessingRule {
    pub id: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Segmentation {
    pub separator: String,
    pub max_tokens: u32,
}

/// Assemble the write payload for one card. Pre-processing is pinned
/// off so the stored text stays byte-for-byte what was pushed; the
/// separator and chunk size come from [`SegmentationConfig`].
pub fn build_document_payload(
    name: &str,
    text: &str,
    segmentation: &SegmentationConfig,
) -> DocumentPayload {
    DocumentPayload {
        name: name.to_string(),
        text: text.to_string(),
        indexing_technique: "high_quality",
        process_rule: ProcessRule {
            mode: "custom",
            rules: ProcessRules {
                pre_processing_rules: vec![
                    PreProcessingRule {
                        id: "remove_extra_spaces",
                        enabled: false,
                    },
                    PreProcessingRule {
                        id: "remove_urls_emails",
                        enabled: false,
                    },
                ],
                segmentation: Segmentation {
                    separator: segmentation.separator.clone(),
                    max_tokens: segmentation.max_tokens,
                },
            },
        },
    }
}
