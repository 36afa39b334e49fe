// =============================================================================
// Yahoo Finance chart API client
// =============================================================================
//
// GET /v8/finance/chart/{symbol}?interval=1d&range=1y
//
// The response carries parallel arrays (timestamp[], open[], high[], ...)
// with `null` holes on non-trading days; rows without a close are dropped.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use chrono::DateTime;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::types::PriceBar;

use super::PriceSource;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// -----------------------------------------------------------------------------
// Wire format
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteArrays>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteArrays {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// -----------------------------------------------------------------------------
// Client
// -----------------------------------------------------------------------------

#[derive(Clone)]
pub struct YahooClient {
    base_url: String,
    range: String,
    interval: String,
    client: reqwest::Client,
}

impl YahooClient {
    /// Create a client requesting `range` of `interval` bars (e.g. `1y`, `1d`).
    pub fn new(range: impl Into<String>, interval: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to build tuned HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            range: range.into(),
            interval: interval.into(),
            client,
        }
    }

    /// The symbol is a single percent-encoded path segment.
    fn chart_url(&self, symbol: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base URL {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("base URL {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("interval", &self.interval)
            .append_pair("range", &self.range);
        Ok(url)
    }
}

impl PriceSource for YahooClient {
    #[instrument(skip(self), name = "yahoo::fetch_daily")]
    async fn fetch_daily(&self, symbol: &str) -> Result<Vec<PriceBar>> {
        let url = self.chart_url(symbol)?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("GET /v8/finance/chart request failed")?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("failed to read chart response body")?;

        // Yahoo reports unknown tickers as 404 with a JSON error payload;
        // prefer that message when it parses.
        let bars = parse_chart(&body);
        if !status.is_success() {
            return match bars {
                Err(e) => Err(e.context(format!("Yahoo chart API returned {status}"))),
                Ok(_) => anyhow::bail!("Yahoo chart API returned {status}"),
            };
        }

        let bars = bars?;
        debug!(symbol, count = bars.len(), "daily bars fetched");
        Ok(bars)
    }
}

/// Parse a chart API body into ascending bars.
fn parse_chart(body: &str) -> Result<Vec<PriceBar>> {
    let response: ChartResponse =
        serde_json::from_str(body).context("failed to parse chart response")?;

    if let Some(error) = response.chart.error {
        anyhow::bail!("Yahoo API error: {} - {}", error.code, error.description);
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars = Vec::with_capacity(data.timestamp.len());
    for (i, &ts) in data.timestamp.iter().enumerate() {
        let field = |v: &Vec<Option<f64>>| v.get(i).copied().flatten();
        let Some(close) = field(&quote.close) else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            warn!(ts, "skipping bar with out-of-range timestamp");
            continue;
        };

        bars.push(PriceBar {
            date,
            open: field(&quote.open),
            high: field(&quote.high),
            low: field(&quote.low),
            close,
            volume: field(&quote.volume),
        });
    }

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}

impl std::fmt::Debug for YahooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooClient")
            .field("base_url", &self.base_url)
            .field("range", &self.range)
            .field("interval", &self.interval)
            .finish()
    }
}
