use clap::Parser;
use firedrop_cli::commands::{self, cli};
use firedrop_core::api as core_api;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> anyhow::Result<i32> {
    // .env from the working directory feeds the FIREDROP_* overrides.
    dotenvy::dotenv().ok();

    let args = cli::Args::parse();
    let mut cfg = core_api::load_default()?;
    if let Some(base_url) = &args.base_url {
        cfg.service.base_url = base_url.clone();
    }
    if let Some(api_key) = &args.api_key {
        cfg.service.api_key = api_key.clone();
    }

    init_tracing(&cfg.logging)?;

    dispatch(args.command, cfg).await
}

fn exit_code_for_error(e: &anyhow::Error) -> i32 {
    // 0: success
    // 2: usage error (also what clap uses)
    // 11: config error
    // 20: transport / service / input IO error
    // 50: internal/uncategorized
    if e.downcast_ref::<core_api::ConfigError>().is_some() {
        return 11;
    }
    match e.downcast_ref::<core_api::SyncError>() {
        Some(core_api::SyncError::Transport { .. }) | Some(core_api::SyncError::Status { .. }) => {
            return 20;
        }
        Some(core_api::SyncError::Decode { .. }) => return 50,
        None => {}
    }
    if e.downcast_ref::<std::io::Error>().is_some() {
        return 20;
    }
    50
}

async fn dispatch(cmd: cli::Commands, cfg: core_api::AppConfig) -> anyhow::Result<i32> {
    match cmd {
        cli::Commands::Push(push_args) => commands::push::handle_push(push_args, cfg).await,
        cli::Commands::Wipe(wipe_args) => commands::wipe::handle_wipe(wipe_args, cfg).await,
    }
}

fn init_tracing(logging: &core_api::LoggingConfig) -> anyhow::Result<()> {
    if !logging.console && !logging.file {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone())
            .map_err(|e| anyhow::anyhow!("bad logging.level: {e}"))?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("firedrop"),
        };

        std::fs::create_dir_all(&dir)
            .map_err(|e| anyhow::anyhow!("create log dir failed: {e}"))?;
        let file_name = format!("firedrop.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
