//! `firedrop push`: sync text files into a dataset.

use chrono::Utc;
use firedrop_core::api as core_api;
use serde_json::json;

use crate::cards;
use crate::commands::cli::PushArgs;

pub async fn handle_push(args: PushArgs, mut cfg: core_api::AppConfig) -> anyhow::Result<i32> {
    if args.format != "text" && args.format != "json" {
        eprintln!("unknown format {:?} (expected text or json)", args.format);
        return Ok(2);
    }

    if let Some(separator) = args.separator.clone() {
        cfg.segmentation.separator = separator;
    }

    let cards = cards::collect_cards(&args.inputs)?;
    let service = core_api::SyncService::new(&cfg)?;

    let opts = core_api::PushOptions {
        force_override: args.force,
        watch_indexing: args.watch,
        // Bars only for humans; json output stays machine-clean.
        progress: args.format == "text" && atty::is(atty::Stream::Stderr),
    };

    let started_at = Utc::now();
    let outcomes = service.push(&args.dataset, &cards, &opts).await?;
    let finished_at = Utc::now();

    let skipped = outcomes
        .iter()
        .filter(|o| o.action == core_api::CardAction::Skipped)
        .count();

    if args.format == "json" {
        let report = json!({
            "dataset": args.dataset,
            "cards": outcomes.len(),
            "skipped": skipped,
            "outcomes": outcomes,
            "started_at": started_at.to_rfc3339(),
            "finished_at": finished_at.to_rfc3339(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &outcomes {
            match outcome.document_id.as_deref() {
                Some(id) => println!("{}: {} ({})", outcome.name, outcome.action, id),
                None => println!("{}: {}", outcome.name, outcome.action),
            }
        }
        let skipped_note = if skipped > 0 {
            format!(" ({skipped} skipped)")
        } else {
            String::new()
        };
        println!(
            "pushed {} card(s) to {:?}{}",
            outcomes.len(),
            args.dataset,
            skipped_note
        );
    }

    Ok(0)
}
