// =============================================================================
// Telegram Bot API notifier
// =============================================================================
//
// POST https://api.telegram.org/bot{token}/sendMessage
//   chat_id, text, parse_mode=HTML, disable_web_page_preview=true
//
// The token is part of the URL, so neither the URL nor the token is logged.
// =============================================================================

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use crate::config::ReportConfig;

use super::Notifier;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to build tuned HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    /// `None` unless both `BOT_TOKEN` and `CHAT_ID` are configured.
    pub fn from_config(config: &ReportConfig) -> Option<Self> {
        config
            .telegram_credentials()
            .map(|(token, chat)| Self::new(token, chat))
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.token)
    }
}

impl Notifier for TelegramNotifier {
    #[instrument(skip(self, text), name = "telegram::send")]
    async fn send(&self, text: &str) -> Result<()> {
        let params = [
            ("chat_id", self.chat_id.as_str()),
            ("text", text),
            ("parse_mode", "HTML"),
            ("disable_web_page_preview", "true"),
        ];

        let resp = self
            .client
            .post(self.send_message_url())
            .form(&params)
            .send()
            .await
            // reqwest errors embed the URL, which embeds the token.
            .map_err(|e| anyhow::anyhow!("sendMessage request failed: {}", e.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .context("failed to read sendMessage error body")?;
            anyhow::bail!("Telegram sendMessage returned {}: {}", status, body);
        }

        debug!(chat_id = %self.chat_id, "telegram message delivered");
        Ok(())
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_credentials() {
        assert!(TelegramNotifier::from_config(&ReportConfig::default()).is_none());

        let mut cfg = ReportConfig::default();
        cfg.bot_token = Some("123:abc".into());
        assert!(TelegramNotifier::from_config(&cfg).is_none());
    }

    #[test]
    fn enabled_with_both_credentials() {
        let mut cfg = ReportConfig::default();
        cfg.bot_token = Some("123:abc".into());
        cfg.chat_id = Some("42".into());
        let notifier = TelegramNotifier::from_config(&cfg).unwrap();
        assert_eq!(
            notifier.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let notifier = TelegramNotifier::new("secret-token", "42");
        let dbg = format!("{notifier:?}");
        assert!(!dbg.contains("secret-token"));
        assert!(dbg.contains("<redacted>"));
    }
}
