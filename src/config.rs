// =============================================================================
// Report Configuration — loaded once, threaded explicitly into the pipeline
// =============================================================================
//
// JSON keys are upper-case (`SYMBOLS`, `BOT_TOKEN`, ...). All fields carry a
// serde default so that a partial file, or `{}`, still loads.
//
// Resolution order: an explicit `--config` path, then `config.json`, then
// `config_sample.json`, then the built-in defaults. Whichever source wins is
// logged.
// =============================================================================

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

pub const PRIMARY_CONFIG_PATH: &str = "config.json";
pub const SAMPLE_CONFIG_PATH: &str = "config_sample.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbols() -> Vec<String> {
    vec![
        "RELIANCE.NS".to_string(),
        "TCS.NS".to_string(),
        "HDFCBANK.NS".to_string(),
    ]
}

fn default_timeframes() -> Vec<String> {
    vec!["1d".to_string()]
}

fn default_report_path() -> PathBuf {
    PathBuf::from("output/daily_report.html")
}

fn default_signals_path() -> PathBuf {
    PathBuf::from("output/signals.json")
}

fn default_template_path() -> PathBuf {
    PathBuf::from("templates/report_template.html")
}

fn default_history_range() -> String {
    "1y".to_string()
}

fn default_history_interval() -> String {
    "1d".to_string()
}

/// Telegram chat ids are often written as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// =============================================================================
// ReportConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Telegram bot token. Notification is disabled unless both this and
    /// `chat_id` are set.
    #[serde(rename = "BOT_TOKEN", default)]
    pub bot_token: Option<String>,

    #[serde(rename = "CHAT_ID", default, deserialize_with = "string_or_number")]
    pub chat_id: Option<String>,

    /// Label → URL, rendered as links on every report card.
    #[serde(rename = "AFFILIATES", default)]
    pub affiliates: BTreeMap<String, String>,

    /// Tickers to analyse, in report order.
    #[serde(rename = "SYMBOLS", default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Accepted for compatibility; the daily pass does not use it.
    #[serde(rename = "TIMEFRAMES", default = "default_timeframes")]
    pub timeframes: Vec<String>,

    #[serde(rename = "REPORT_PATH", default = "default_report_path")]
    pub report_path: PathBuf,

    #[serde(rename = "SIGNALS_PATH", default = "default_signals_path")]
    pub signals_path: PathBuf,

    #[serde(rename = "TEMPLATE_PATH", default = "default_template_path")]
    pub template_path: PathBuf,

    /// Trailing window requested from the price source.
    #[serde(rename = "HISTORY_RANGE", default = "default_history_range")]
    pub history_range: String,

    #[serde(rename = "HISTORY_INTERVAL", default = "default_history_interval")]
    pub history_interval: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            affiliates: BTreeMap::new(),
            symbols: default_symbols(),
            timeframes: default_timeframes(),
            report_path: default_report_path(),
            signals_path: default_signals_path(),
            template_path: default_template_path(),
            history_range: default_history_range(),
            history_interval: default_history_interval(),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbols = config.symbols.len(),
            "config loaded"
        );

        Ok(config)
    }

    /// Walk the candidate files in order and return the first that loads,
    /// falling back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> (Self, ConfigOrigin) {
        let candidates: Vec<PathBuf> = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => vec![
                PathBuf::from(PRIMARY_CONFIG_PATH),
                PathBuf::from(SAMPLE_CONFIG_PATH),
            ],
        };

        for path in candidates {
            if explicit.is_none() && !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => return (config, ConfigOrigin::File(path)),
                Err(e) => warn!(error = %format!("{e:#}"), "config candidate rejected"),
            }
        }

        warn!("no usable config file, using defaults");
        (Self::default(), ConfigOrigin::Defaults)
    }

    /// Apply environment overrides: `SIGNALS_SYMBOLS` (comma-separated),
    /// `BOT_TOKEN` and `CHAT_ID`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(syms) = lookup("SIGNALS_SYMBOLS") {
            let symbols: Vec<String> = syms
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
            if !symbols.is_empty() {
                self.symbols = symbols;
            }
        }
        if let Some(token) = lookup("BOT_TOKEN") {
            self.bot_token = Some(token);
        }
        if let Some(chat) = lookup("CHAT_ID") {
            self.chat_id = Some(chat);
        }
    }

    /// `(token, chat_id)` when both are configured and non-empty.
    pub fn telegram_credentials(&self) -> Option<(&str, &str)> {
        let token = self.bot_token.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let chat = self.chat_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((token, chat))
    }
}
