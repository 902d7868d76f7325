use firedrop_core::api::{AppConfig, SyncService};
use serde_json::json;

/// Service wired to a mockito server with a test token and a short
/// timeout.
pub fn service_for(server: &mockito::Server) -> SyncService {
    let mut cfg = AppConfig::default();
    cfg.service.base_url = server.url();
    cfg.service.api_key = "test-key".to_string();
    cfg.service.timeout_ms = 2_000;
    SyncService::new(&cfg).unwrap()
}

pub fn datasets_body(entries: &[(&str, &str)]) -> String {
    let data: Vec<_> = entries
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    json!({ "data": data }).to_string()
}

pub fn documents_body(entries: &[(&str, &str)]) -> String {
    let data: Vec<_> = entries
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name, "archived": false}))
        .collect();
    json!({ "data": data }).to_string()
}

pub fn upload_body(document_id: &str, stored_name: &str, batch: &str) -> String {
    json!({
        "document": {"id": document_id, "name": stored_name, "archived": false},
        "batch": batch,
    })
    .to_string()
}

pub fn indexing_body(state: &str, completed: u64, total: u64) -> String {
    json!({
        "data": [{
            "indexing_status": state,
            "completed_segments": completed,
            "total_segments": total,
        }]
    })
    .to_string()
}

pub fn indexing_error_body(detail: &str) -> String {
    json!({
        "data": [{
            "indexing_status": "error",
            "completed_segments": 0,
            "total_segments": 0,
            "error": detail,
        }]
    })
    .to_string()
}
