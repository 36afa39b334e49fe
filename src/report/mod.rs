// =============================================================================
// Report — JSON and HTML renderings of the signal list
// =============================================================================

pub mod template;
pub mod writer;

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde_json::json;

use crate::signals::SignalRecord;

pub use template::{Template, TemplateOrigin};
pub use writer::write_atomic;

/// Pretty-printed JSON array of records, keys in declaration order.
pub fn signals_json(records: &[SignalRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("failed to serialise signal records")
}

/// Render the HTML report.
///
/// Context exposed to the template: `signals`, `generated_at`,
/// `affiliates` (label → URL map) and `affiliate_links` (list of
/// `{label, url}` for looping).
pub fn render_html(
    template: &Template,
    records: &[SignalRecord],
    generated_at: &str,
    affiliates: &BTreeMap<String, String>,
) -> Result<String> {
    let affiliate_links: Vec<_> = affiliates
        .iter()
        .map(|(label, url)| json!({ "label": label, "url": url }))
        .collect();

    let context = json!({
        "signals": records,
        "generated_at": generated_at,
        "affiliates": affiliates,
        "affiliate_links": affiliate_links,
    });

    template.render(&context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::IndicatorSnapshot;
    use crate::types::CrossState::Bullish;

    fn records() -> Vec<SignalRecord> {
        vec![
            SignalRecord::from_snapshot(
                "TCS.NS",
                &IndicatorSnapshot::new(Some(55.0), Some(Bullish), Some(Bullish)),
            ),
            SignalRecord::from_snapshot("INFY.NS", &IndicatorSnapshot::default()),
        ]
    }

    #[test]
    fn json_is_pretty_array_with_two_space_indent() {
        let json = signals_json(&records()).unwrap();
        assert!(json.starts_with("[\n  {\n    \"symbol\": \"TCS.NS\","));
        let parsed: Vec<SignalRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, records());
    }

    #[test]
    fn empty_list_serialises_as_empty_array() {
        assert_eq!(signals_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn builtin_html_shows_every_record_and_link() {
        let template = Template::parse(template::BUILTIN_TEMPLATE).unwrap();
        let mut affiliates = BTreeMap::new();
        affiliates.insert("Zerodha".to_string(), "https://z.example/?ref=1&x=2".to_string());

        let html = render_html(&template, &records(), "2024-01-02 08:00:00", &affiliates).unwrap();

        assert!(html.contains("Generated: 2024-01-02 08:00:00"));
        assert!(html.contains("<h2>TCS.NS</h2>"));
        assert!(html.contains("<h2>INFY.NS</h2>"));
        assert!(html.contains("Score (S/M/L): 4.5 / 5.5 / 6.5"));
        assert!(html.contains("RSI: 55.0, MACD: bullish, EMA50/200: bullish"));
        assert!(html.contains("RSI: None, MACD: None, EMA50/200: None"));
        assert!(html.contains("PE: None | ROE: None"));
        assert!(html.contains(r#"href="https://z.example/?ref=1&amp;x=2""#));
        assert_eq!(html.matches("Trade on Zerodha").count(), 2);
    }

    #[test]
    fn affiliates_are_addressable_by_label() {
        let template = Template::parse("{{ affiliates.dhan }}").unwrap();
        let mut affiliates = BTreeMap::new();
        affiliates.insert("dhan".to_string(), "https://dhan.co".to_string());
        assert_eq!(
            render_html(&template, &[], "t", &affiliates).unwrap(),
            "https://dhan.co"
        );
    }
}
