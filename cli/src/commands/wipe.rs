//! `firedrop wipe`: delete every document in a dataset.

use firedrop_core::api as core_api;
use serde_json::json;

use crate::commands::cli::WipeArgs;

pub async fn handle_wipe(args: WipeArgs, cfg: core_api::AppConfig) -> anyhow::Result<i32> {
    if args.format != "text" && args.format != "json" {
        eprintln!("unknown format {:?} (expected text or json)", args.format);
        return Ok(2);
    }

    if !args.yes {
        eprintln!(
            "wipe deletes every document in {:?}; re-run with --yes to confirm",
            args.dataset
        );
        return Ok(2);
    }

    let service = core_api::SyncService::new(&cfg)?;
    let report = service.delete_all(&args.dataset).await?;

    if args.format == "json" {
        let out = json!({
            "dataset": args.dataset,
            "deleted": report.deleted,
            "failed": report.failed,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let failed_note = if report.failed > 0 {
            format!(" ({} failed)", report.failed)
        } else {
            String::new()
        };
        println!(
            "deleted {} document(s) from {:?}{}",
            report.deleted, args.dataset, failed_note
        );
    }

    Ok(0)
}
