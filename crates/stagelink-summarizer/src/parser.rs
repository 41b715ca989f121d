// Extracts the JSON summary object out of a raw completion, which models
// frequently wrap in a markdown code fence despite instructions not to.

use crate::error::{Result, SummarizeError};
use serde::{Deserialize, Serialize};

/// Validated shape of the model's summary output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSummary {
    pub summary: String,
    pub key_points: Vec<String>,
}

/// Parse a raw completion into a [`ParsedSummary`]
///
/// Markdown fencing is stripped first: a ```json fence wins over a generic
/// ``` fence, and unfenced text is used as-is. Malformed JSON, a missing
/// field, or an empty `summary` all fail with the raw text attached;
/// `key_points` may legitimately be empty.
pub fn parse_summary(raw: &str) -> Result<ParsedSummary> {
    let candidate = extract_json_block(raw);

    let parsed: ParsedSummary =
        serde_json::from_str(candidate).map_err(|e| SummarizeError::MalformedSummary {
            reason: e.to_string(),
            raw: raw.to_string(),
        })?;

    if parsed.summary.trim().is_empty() {
        return Err(SummarizeError::MalformedSummary {
            reason: "summary field is empty".to_string(),
            raw: raw.to_string(),
        });
    }

    Ok(parsed)
}

/// Three explicit cases: json-fenced, generic-fenced, unfenced.
/// A missing closing fence takes everything up to the end of the text.
fn extract_json_block(raw: &str) -> &str {
    if let Some(start) = raw.find("```json") {
        let rest = &raw[start + "```json".len()..];
        let end = rest.find("```").unwrap_or(rest.len());
        rest[..end].trim()
    } else if let Some(start) = raw.find("```") {
        let rest = &raw[start + "```".len()..];
        let end = rest.find("```").unwrap_or(rest.len());
        rest[..end].trim()
    } else {
        raw.trim()
    }
}
