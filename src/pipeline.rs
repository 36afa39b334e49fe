// =============================================================================
// Report Pipeline — fetch → indicators → score → signal → JSON/HTML → notify
// =============================================================================
//
// One sequential pass over the configured symbols. Every stage is isolated:
// a failed fetch skips only that symbol, a failed write or notification is
// recorded and the remaining stages still run. Nothing here aborts the run;
// the outcome of every step is returned in a `RunSummary`.
// =============================================================================

use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::ReportConfig;
use crate::market_data::PriceSource;
use crate::notify::{buy_summary, Notifier};
use crate::report::{self, Template, TemplateOrigin};
use crate::signals::{IndicatorSnapshot, SignalRecord};
use crate::types::Signal;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// What happened to one configured symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOutcome {
    Recorded { symbol: String, signal: Signal },
    Skipped { symbol: String, reason: String },
}

/// Result of writing one output file.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    Written(PathBuf),
    Failed(String),
}

impl StageOutcome {
    fn from_result(result: Result<PathBuf>) -> Self {
        match result {
            Ok(path) => Self::Written(path),
            Err(e) => Self::Failed(format!("{e:#}")),
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

impl std::fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Written(path) => write!(f, "Written({})", path.display()),
            Self::Failed(err) => write!(f, "Failed({err})"),
        }
    }
}

/// Result of the notification step.
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyOutcome {
    /// Message delivered; `buys` symbols were listed.
    Sent { buys: usize },
    /// No bot token / chat id configured; nothing was attempted.
    Disabled,
    Failed(String),
}

impl std::fmt::Display for NotifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sent { buys } => write!(f, "Sent({buys} buys)"),
            Self::Disabled => write!(f, "Disabled"),
            Self::Failed(err) => write!(f, "Failed({err})"),
        }
    }
}

/// Everything a run produced, stage by stage.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub generated_at: String,
    /// Records in configured symbol order; skipped symbols are absent.
    pub records: Vec<SignalRecord>,
    pub symbols: Vec<SymbolOutcome>,
    pub signals_json: StageOutcome,
    pub html_report: StageOutcome,
    /// Template used for the HTML report, when rendering got that far.
    pub template: Option<TemplateOrigin>,
    pub notification: NotifyOutcome,
}

impl RunSummary {
    pub fn skipped(&self) -> usize {
        self.symbols
            .iter()
            .filter(|o| matches!(o, SymbolOutcome::Skipped { .. }))
            .count()
    }

    pub fn buys(&self) -> usize {
        self.records.iter().filter(|r| r.is_buy()).count()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

pub struct ReportPipeline<S, N> {
    config: ReportConfig,
    source: S,
    notifier: Option<N>,
}

impl<S: PriceSource, N: Notifier> ReportPipeline<S, N> {
    /// `notifier` is `None` when notification is not configured.
    pub fn new(config: ReportConfig, source: S, notifier: Option<N>) -> Self {
        Self {
            config,
            source,
            notifier,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run with the current local time as the report timestamp.
    pub async fn run(&self) -> RunSummary {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.run_at(generated_at).await
    }

    /// Run with an explicit report timestamp.
    pub async fn run_at(&self, generated_at: String) -> RunSummary {
        let run_id = Uuid::new_v4();
        self.execute(run_id, generated_at)
            .instrument(info_span!("report_run", %run_id))
            .await
    }

    async fn execute(&self, run_id: Uuid, generated_at: String) -> RunSummary {
        info!(symbols = self.config.symbols.len(), "report run started");

        // ── 1. Per-symbol analysis ───────────────────────────────────────
        let mut records = Vec::with_capacity(self.config.symbols.len());
        let mut symbols = Vec::with_capacity(self.config.symbols.len());

        for symbol in &self.config.symbols {
            match self.analyse_symbol(symbol).await {
                Ok(record) => {
                    info!(
                        symbol = %record.symbol,
                        signal = %record.signal,
                        rsi = ?record.rsi,
                        score_short = record.score_short,
                        score_medium = record.score_medium,
                        score_long = record.score_long,
                        "symbol scored"
                    );
                    symbols.push(SymbolOutcome::Recorded {
                        symbol: symbol.clone(),
                        signal: record.signal,
                    });
                    records.push(record);
                }
                Err(e) => {
                    let reason = format!("{e:#}");
                    warn!(symbol = %symbol, error = %reason, "symbol skipped");
                    symbols.push(SymbolOutcome::Skipped {
                        symbol: symbol.clone(),
                        reason,
                    });
                }
            }
        }

        // ── 2. JSON ──────────────────────────────────────────────────────
        let signals_json = StageOutcome::from_result(self.write_signals(&records));
        if let StageOutcome::Failed(err) = &signals_json {
            warn!(error = %err, "signals JSON not written");
        }

        // ── 3. HTML ──────────────────────────────────────────────────────
        let (html_report, template) = match self.write_html(&records, &generated_at) {
            Ok((path, origin)) => (StageOutcome::Written(path), Some(origin)),
            Err(e) => {
                let err = format!("{e:#}");
                warn!(error = %err, "HTML report not written");
                (StageOutcome::Failed(err), None)
            }
        };

        // ── 4. Notification ──────────────────────────────────────────────
        let notification = self.notify(&records).await;

        let summary = RunSummary {
            run_id,
            generated_at,
            records,
            symbols,
            signals_json,
            html_report,
            template,
            notification,
        };

        info!(
            recorded = summary.records.len(),
            skipped = summary.skipped(),
            buys = summary.buys(),
            signals_json = %summary.signals_json,
            html_report = %summary.html_report,
            notification = %summary.notification,
            "report run finished"
        );

        summary
    }

    async fn analyse_symbol(&self, symbol: &str) -> Result<SignalRecord> {
        let bars = self.source.fetch_daily(symbol).await?;
        if bars.is_empty() {
            anyhow::bail!("no price history returned");
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let snapshot = IndicatorSnapshot::from_closes(&closes);

        Ok(SignalRecord::from_snapshot(symbol, &snapshot))
    }

    fn write_signals(&self, records: &[SignalRecord]) -> Result<PathBuf> {
        let json = report::signals_json(records)?;
        report::write_atomic(&self.config.signals_path, &json)?;
        Ok(self.config.signals_path.clone())
    }

    fn write_html(
        &self,
        records: &[SignalRecord],
        generated_at: &str,
    ) -> Result<(PathBuf, TemplateOrigin)> {
        let (template, origin) = Template::load_or_builtin(&self.config.template_path)?;
        let html = report::render_html(&template, records, generated_at, &self.config.affiliates)?;
        report::write_atomic(&self.config.report_path, &html)?;
        Ok((self.config.report_path.clone(), origin))
    }

    async fn notify(&self, records: &[SignalRecord]) -> NotifyOutcome {
        let Some(notifier) = &self.notifier else {
            return NotifyOutcome::Disabled;
        };

        let message = buy_summary(records);
        match notifier.send(&message).await {
            Ok(()) => NotifyOutcome::Sent {
                buys: records.iter().filter(|r| r.is_buy()).count(),
            },
            Err(e) => {
                let err = format!("{e:#}");
                warn!(error = %err, "notification failed");
                NotifyOutcome::Failed(err)
            }
        }
    }
}
