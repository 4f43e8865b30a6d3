//! Factory for building the session Context from parsed args and config.

use crate::app::App;
use crate::cli::{Args, ConsoleNotifier, Context};
use crate::config::Config;
use crate::service::HttpUserService;
use crate::transcript::Transcript;
use anyhow::{anyhow, Context as _, Result};
use std::cell::RefCell;
use std::sync::Arc;

/// Command-line flags win over the config file.
pub fn apply_cli_overrides(cfg: &mut Config, args: &Args) {
    if let Some(url) = &args.base_url {
        cfg.base_url = url.clone();
    }
    if let Some(dir) = &args.transcripts_dir {
        cfg.transcripts_dir = dir.display().to_string();
    }
    if args.yes {
        cfg.auto_confirm = true;
    }
}

/// Load the config named by `--config`, or the default one.
pub fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load().unwrap_or_else(|e| {
            eprintln!("[userdesk] {:#}, using defaults", e);
            Config::default()
        })),
    }
}

/// Build a Context from a validated Config.
pub fn build_context(args: Args, cfg: Config) -> Result<Context> {
    let base_url = cfg
        .resolve_base_url()
        .ok_or_else(|| anyhow!("base_url {} does not resolve", cfg.base_url))?;

    // Create transcript directory if needed
    let transcripts_dir = cfg.transcripts_path();
    std::fs::create_dir_all(&transcripts_dir).with_context(|| {
        format!(
            "Failed to create transcripts dir {}",
            transcripts_dir.display()
        )
    })?;

    let session_id = uuid::Uuid::new_v4().to_string();
    let transcript_path = transcripts_dir.join(format!("{}.jsonl", session_id));
    let mut transcript = Transcript::new(&transcript_path, &session_id)
        .with_context(|| format!("Failed to create transcript {}", transcript_path.display()))?;
    let mode = if args.exec.is_some() { "exec" } else { "repl" };
    transcript.session_start(&base_url, mode)?;

    let notifier = Arc::new(ConsoleNotifier::new(Some(transcript), args.trace));
    let service = Arc::new(HttpUserService::new(&base_url));
    let app = App::new(service, notifier.clone())
        .with_release_busy_on_cancel(cfg.release_busy_on_cancel);

    Ok(Context {
        args,
        config: cfg,
        base_url,
        session_id,
        notifier,
        runtime: tokio::runtime::Runtime::new()?,
        app: RefCell::new(app),
    })
}
