//! Parser for two-part synthesis responses.
//!
//! Report prompts ask the model for a `Part 1: Textual Summary` section
//! followed by a `Part 2: Structured JSON Output` section. The parser is
//! total: whatever the model returns, callers get a [`SynthesisResult`]
//! back and decide what to persist.

const PART1_MARKER: &str = "Part 1: Textual Summary";
const PART2_MARKER: &str = "Part 2: Structured JSON Output";

/// Outcome of splitting a synthesis response into its two parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisResult {
    /// Prose summary; `None` only when the model returned nothing at all.
    pub textual_summary: Option<String>,
    /// The JSON block as raw text, present only when it parsed cleanly.
    pub structured_block: Option<String>,
}

impl SynthesisResult {
    fn whole_text(raw: &str) -> Self {
        Self {
            textual_summary: Some(raw.trim().to_owned()),
            structured_block: None,
        }
    }
}

/// Splits `raw` into a textual summary and a validated JSON block.
///
/// Rules, in order:
/// - Both markers present, in order: summary is the trimmed text between
///   them; the block is the first `{` after the second marker through the
///   last `}` in the response.
/// - The extracted block must parse as JSON. If it does not, the block is
///   dropped and an explicit error note is appended to the summary so the
///   written report shows the gap.
/// - Markers missing or out of order, or no brace pair after the second
///   marker: the whole response becomes the summary.
#[must_use]
pub fn parse_synthesis_response(raw: &str) -> SynthesisResult {
    let Some(idx1) = raw.find(PART1_MARKER) else {
        tracing::warn!("synthesis response missing part markers, keeping whole text as summary");
        return SynthesisResult::whole_text(raw);
    };
    let summary_start = idx1 + PART1_MARKER.len();
    let Some(rel2) = raw[summary_start..].find(PART2_MARKER) else {
        tracing::warn!("synthesis response missing part markers, keeping whole text as summary");
        return SynthesisResult::whole_text(raw);
    };
    let idx2 = summary_start + rel2;
    let summary = raw[summary_start..idx2].trim().to_owned();

    let tail_start = idx2 + PART2_MARKER.len();
    let Some(open_rel) = raw[tail_start..].find('{') else {
        tracing::warn!("no opening brace after structured-output marker");
        return SynthesisResult::whole_text(raw);
    };
    let open = tail_start + open_rel;
    let Some(close_rel) = raw[open..].rfind('}') else {
        tracing::warn!("no closing brace after structured-output marker");
        return SynthesisResult::whole_text(raw);
    };
    let block = raw[open..=open + close_rel].trim();

    if serde_json::from_str::<serde_json::Value>(block).is_ok() {
        SynthesisResult {
            textual_summary: Some(summary),
            structured_block: Some(block.to_owned()),
        }
    } else {
        tracing::error!("structured block in synthesis response is not valid JSON, dropping it");
        SynthesisResult {
            textual_summary: Some(format!(
                "{summary}\n\n[ERROR: Could not parse the structured JSON output; \
                 the malformed block was discarded.]"
            )),
            structured_block: None,
        }
    }
}
