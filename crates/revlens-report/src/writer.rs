//! Report file writing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use revlens_gemini::SynthesisResult;

use crate::error::ReportError;

/// Where a report's files landed.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub text_path: PathBuf,
    /// Present only when the synthesis produced a valid structured block.
    pub json_path: Option<PathBuf>,
}

/// Writes a synthesis result under `<reports_dir>/<kind>/<slug>/`.
///
/// The text file always carries the header plus the summary (including any
/// parser error note). The JSON file is written only when a structured
/// block survived validation, pretty-printed.
pub(crate) fn write_report(
    reports_dir: &Path,
    kind: &str,
    slug: &str,
    base_name: &str,
    header: &str,
    result: &SynthesisResult,
) -> Result<ReportPaths, ReportError> {
    let dir = reports_dir.join(kind).join(slug);
    fs::create_dir_all(&dir).map_err(|e| ReportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let base = format!("{base_name}_{timestamp}");

    let text_path = dir.join(format!("{base}.txt"));
    let summary = result
        .textual_summary
        .as_deref()
        .unwrap_or("No textual summary was produced.");
    let body = format!("{header}\n--- Synthesis Summary ---\n{summary}\n");
    fs::write(&text_path, body).map_err(|e| ReportError::Io {
        path: text_path.display().to_string(),
        source: e,
    })?;
    tracing::info!(path = %text_path.display(), "textual summary written");

    let json_path = match result.structured_block.as_deref() {
        Some(block) => match serde_json::from_str::<serde_json::Value>(block) {
            Ok(value) => {
                let path = dir.join(format!("{base}.json"));
                let pretty = serde_json::to_string_pretty(&value)
                    .unwrap_or_else(|_| block.to_owned());
                fs::write(&path, pretty).map_err(|e| ReportError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?;
                tracing::info!(path = %path.display(), "structured output written");
                Some(path)
            }
            // The parser already validated the block; this only fires if a
            // caller hand-built the result.
            Err(err) => {
                tracing::error!(error = %err, "structured block failed re-validation, skipping JSON file");
                None
            }
        },
        None => None,
    };

    Ok(ReportPaths {
        text_path,
        json_path,
    })
}

#[cfg(test)]
mod tests {
    use revlens_gemini::SynthesisResult;

    use super::*;

    #[test]
    fn writes_text_and_pretty_json() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let result = SynthesisResult {
            textual_summary: Some("Battery life improved.".to_owned()),
            structured_block: Some("{\"trend\":\"up\"}".to_owned()),
        };

        let paths = write_report(
            tmp.path(),
            "brand_evolution",
            "apple",
            "apple_evolution",
            "Longitudinal Analysis Report for: Apple",
            &result,
        )
        .expect("write should succeed");

        let text = std::fs::read_to_string(&paths.text_path).expect("text file");
        assert!(text.contains("Longitudinal Analysis Report for: Apple"));
        assert!(text.contains("Battery life improved."));

        let json_path = paths.json_path.expect("json file expected");
        let json = std::fs::read_to_string(json_path).expect("json file");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&json).expect("valid json"),
            serde_json::json!({"trend": "up"})
        );
        assert!(json.contains('\n'), "json should be pretty-printed");
    }

    #[test]
    fn dropped_block_writes_only_the_text_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let result = SynthesisResult {
            textual_summary: Some(
                "summary\n\n[ERROR: Could not parse the structured JSON output; \
                 the malformed block was discarded.]"
                    .to_owned(),
            ),
            structured_block: None,
        };

        let paths = write_report(tmp.path(), "comparative_analysis", "flagships", "flagships", "Header", &result)
            .expect("write should succeed");

        assert!(paths.json_path.is_none());
        let text = std::fs::read_to_string(&paths.text_path).expect("text file");
        assert!(text.contains("[ERROR:"), "error note must reach the written report");
    }

    #[test]
    fn nested_directories_are_created() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let result = SynthesisResult {
            textual_summary: Some("s".to_owned()),
            structured_block: None,
        };
        let paths = write_report(tmp.path(), "category_factors", "saas-crm", "saas-crm", "H", &result)
            .expect("write should succeed");
        assert!(paths.text_path.starts_with(tmp.path().join("category_factors").join("saas-crm")));
    }
}
