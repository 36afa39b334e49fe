// =============================================================================
// Daily Signals — Main Entry Point
// =============================================================================
//
// A single batch pass: load config, score every configured ticker, write
// `signals.json` and the HTML report, then optionally post a Telegram
// summary. Per-symbol and per-stage failures are logged and the process
// still exits successfully.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod cli;
mod config;
mod indicators;
mod market_data;
mod notify;
mod pipeline;
mod report;
mod scaffold;
mod signals;
mod types;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::ReportConfig;
use crate::market_data::YahooClient;
use crate::notify::TelegramNotifier;
use crate::pipeline::ReportPipeline;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Init { force }) = cli.command {
        let cwd = std::env::current_dir()?;
        let written = scaffold::write_starter_files(&cwd, force)?;
        info!(files = written.len(), "starter files ready; copy config_sample.json to config.json");
        return Ok(());
    }

    // ── 2. Config ────────────────────────────────────────────────────────
    let (mut config, origin) = ReportConfig::resolve(cli.config.as_deref());
    config.apply_env_overrides();

    info!(
        source = %origin,
        symbols = ?config.symbols,
        timeframes = ?config.timeframes,
        report_path = %config.report_path.display(),
        "configuration ready"
    );

    // ── 3. Collaborators ─────────────────────────────────────────────────
    let source = YahooClient::new(&config.history_range, &config.history_interval);
    let notifier = TelegramNotifier::from_config(&config);
    if notifier.is_none() {
        info!("BOT_TOKEN / CHAT_ID not set, Telegram notification disabled");
    }

    // ── 4. Run ───────────────────────────────────────────────────────────
    let pipeline = ReportPipeline::new(config, source, notifier);
    let summary = pipeline.run().await;

    if summary.records.is_empty() {
        warn!("no symbol produced a record; report is empty");
    }
    if !summary.html_report.is_written() {
        warn!(outcome = %summary.html_report, "HTML report missing for this run");
    }

    info!(
        run_id = %summary.run_id,
        generated_at = %summary.generated_at,
        template = ?summary.template,
        report = %pipeline.config().report_path.display(),
        "Done."
    );
    Ok(())
}
