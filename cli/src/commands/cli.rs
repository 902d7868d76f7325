use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "firedrop", version, about = "Push knowledge cards into a Dify-style knowledge base")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the service base URL from config/env.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the API key from config/env.
    #[arg(long, global = true)]
    pub api_key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Push(PushArgs),
    Wipe(WipeArgs),
}

/// Sync text files into a dataset, one document per file.
#[derive(ClapArgs, Debug, Clone)]
pub struct PushArgs {
    /// Target dataset name; created when missing.
    #[arg(long, short = 'd')]
    pub dataset: String,

    /// Files or glob patterns. Each file becomes one card named after
    /// its file stem.
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Delete and recreate documents that already exist instead of
    /// updating them in place.
    #[arg(long)]
    pub force: bool,

    /// Poll each write batch until indexing finishes.
    #[arg(long)]
    pub watch: bool,

    /// Segmentation separator override for this run.
    #[arg(long)]
    pub separator: Option<String>,

    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Delete every document in a dataset.
#[derive(ClapArgs, Debug, Clone)]
pub struct WipeArgs {
    #[arg(long, short = 'd')]
    pub dataset: String,

    /// Confirm the deletion; without this flag nothing is touched.
    #[arg(long)]
    pub yes: bool,

    #[arg(long, default_value = "text")]
    pub format: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_push_with_globs() {
        let args = Args::try_parse_from([
            "firedrop", "push", "-d", "catalog", "--force", "--watch", "cards/*.md", "extra.txt",
        ])
        .unwrap();
        match args.command {
            Commands::Push(push) => {
                assert_eq!(push.dataset, "catalog");
                assert!(push.force);
                assert!(push.watch);
                assert_eq!(push.inputs, vec!["cards/*.md", "extra.txt"]);
                assert_eq!(push.format, "text");
            }
            other => panic!("expected push, got {other:?}"),
        }
    }

    #[test]
    fn push_requires_inputs() {
        assert!(Args::try_parse_from(["firedrop", "push", "-d", "catalog"]).is_err());
    }

    #[test]
    fn parses_wipe_with_confirmation() {
        let args =
            Args::try_parse_from(["firedrop", "wipe", "--dataset", "catalog", "--yes"]).unwrap();
        match args.command {
            Commands::Wipe(wipe) => {
                assert_eq!(wipe.dataset, "catalog");
                assert!(wipe.yes);
            }
            other => panic!("expected wipe, got {other:?}"),
        }
    }

    #[test]
    fn global_overrides_parse_after_subcommand() {
        let args = Args::try_parse_from([
            "firedrop",
            "push",
            "-d",
            "catalog",
            "notes.txt",
            "--base-url",
            "http://kb.local/v1",
            "--api-key",
            "k",
        ])
        .unwrap();
        assert_eq!(args.base_url.as_deref(), Some("http://kb.local/v1"));
        assert_eq!(args.api_key.as_deref(), Some("k"));
    }
}
