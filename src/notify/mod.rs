// =============================================================================
// Notifications — end-of-run summary to a chat bot
// =============================================================================

pub mod telegram;

use anyhow::Result;

use crate::signals::SignalRecord;

pub use telegram::TelegramNotifier;

/// Delivers a pre-formatted (HTML) message.
pub trait Notifier {
    async fn send(&self, text: &str) -> Result<()>;
}

/// `<b>Top Buys</b>` followed by one BUY symbol per line, or `None`.
pub fn buy_summary(records: &[SignalRecord]) -> String {
    let buys: Vec<&str> = records
        .iter()
        .filter(|r| r.is_buy())
        .map(|r| r.symbol.as_str())
        .collect();

    let body = if buys.is_empty() {
        "None".to_string()
    } else {
        buys.join("\n")
    };

    format!("<b>Top Buys</b>\n{body}")
}
