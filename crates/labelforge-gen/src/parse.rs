//! Parsing of free-form capability completions.
//!
//! Completions are prose-wrapped JSON at best. The JSON object is extracted,
//! parsed into the draft shape, and validated before anything downstream
//! touches it. A completion that fails any of those steps is a generation
//! failure, which the client converts into fallback synthesis.
use labelforge_core::{CrisisResponse, GeneratedBy, LabelData, LabelError, MarketCode};
use serde::Deserialize;

/// Slice out the outermost JSON object embedded in completion text.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse and validate label content from a completion.
pub fn label_data_from_completion(text: &str) -> Result<LabelData, LabelError> {
    let raw = extract_json(text)
        .ok_or_else(|| LabelError::Generation("completion contained no JSON object".to_string()))?;
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| LabelError::Generation(format!("completion JSON invalid: {e}")))?;
    labelforge_schema::validate_label_data(value)
        .map_err(|e| LabelError::Generation(format!("completion failed validation: {e}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrisisCompletionDraft {
    headline: Option<String>,
    consumer_advisory: Option<String>,
    regulator_steps: Option<Vec<String>>,
}

/// Parse a crisis-drill completion.
pub fn crisis_from_completion(text: &str, market: MarketCode) -> Result<CrisisResponse, LabelError> {
    let raw = extract_json(text)
        .ok_or_else(|| LabelError::Generation("completion contained no JSON object".to_string()))?;
    let draft: CrisisCompletionDraft = serde_json::from_str(raw)
        .map_err(|e| LabelError::Generation(format!("completion JSON invalid: {e}")))?;

    let headline = draft
        .headline
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| LabelError::Generation("completion missing headline".to_string()))?;
    let consumer_advisory = draft
        .consumer_advisory
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| LabelError::Generation("completion missing consumerAdvisory".to_string()))?;

    Ok(CrisisResponse {
        market,
        headline,
        consumer_advisory,
        regulator_steps: draft.regulator_steps.unwrap_or_default(),
        generated_by: GeneratedBy::Ai,
    })
}
