//! Expand CLI inputs (files and glob patterns) into knowledge cards.
//!
//! The card name is the file stem, so `cards/users.md` is pushed as the
//! logical card `users`. Names collide across directories; the later
//! file wins and a warning is logged.

use std::path::Path;

use anyhow::{bail, Context};
use firedrop_core::api::KnowledgeCards;

pub fn collect_cards(inputs: &[String]) -> anyhow::Result<KnowledgeCards> {
    let mut cards = KnowledgeCards::new();

    for input in inputs {
        let entries =
            glob::glob(input).with_context(|| format!("invalid input pattern {input:?}"))?;

        let mut matched = false;
        for entry in entries {
            let path =
                entry.with_context(|| format!("failed to expand input pattern {input:?}"))?;
            if path.is_dir() {
                continue;
            }
            matched = true;
            add_card(&mut cards, &path)?;
        }

        if !matched {
            bail!("input {input:?} matched no files");
        }
    }

    Ok(cards)
}

fn add_card(cards: &mut KnowledgeCards, path: &Path) -> anyhow::Result<()> {
    let name = card_name(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if cards.insert(name.clone(), text).is_some() {
        tracing::warn!(
            target: "firedrop.cli",
            card = %name,
            path = %path.display(),
            "duplicate card name, later file wins"
        );
    }
    Ok(())
}

fn card_name(path: &Path) -> anyhow::Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("cannot derive a card name from {}", path.display()))
}
