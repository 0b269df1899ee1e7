//! Prompt-context formatting for persisted analyses.

use revlens_core::ProductConfig;
use revlens_db::AnalysisRecordRow;

/// Formats persisted analyses into the numbered context block embedded in
/// synthesis prompts. Order is preserved; callers load rows oldest-first
/// so longitudinal prompts read chronologically.
#[must_use]
pub fn format_analyses_block(rows: &[AnalysisRecordRow]) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let published = row
                .video_published_at
                .map_or_else(|| "N/A".to_owned(), |t| t.format("%Y-%m-%d").to_string());
            let content = serde_json::to_string_pretty(&row.analysis)
                .unwrap_or_else(|_| row.analysis.to_string());
            format!(
                "--- Review Analysis {} ---\n\
                 Product Context: {}\n\
                 Video Title: {}\n\
                 Video Published: {}\n\
                 Analysis Content:\n{}\n",
                i + 1,
                row.product_config_name,
                row.video_title,
                published,
                content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line of the "Products Included" listing in report headers and
/// prompts.
#[must_use]
pub fn product_detail_line(product: &ProductConfig, review_count: usize) -> String {
    let year = product
        .release_year
        .map_or_else(|| "N/A".to_owned(), |y| y.to_string());
    format!("- {} ({year}) - {review_count} reviews", product.name)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use revlens_db::AnalysisRecordRow;

    use super::*;

    fn row(n: i64, title: &str, product: &str) -> AnalysisRecordRow {
        AnalysisRecordRow {
            id: n,
            video_id: format!("vid{n}"),
            product_config_name: product.to_owned(),
            product_brand: "Apple".to_owned(),
            product_generation: None,
            product_release_year: Some(2023),
            video_url: format!("https://www.youtube.com/watch?v=vid{n}"),
            video_title: title.to_owned(),
            video_published_at: Some(Utc.with_ymd_and_hms(2023, 10, 5, 0, 0, 0).unwrap()),
            reviewer_channel_id: "UCx".to_owned(),
            reviewer_name: "Reviewer".to_owned(),
            analysis: serde_json::json!({"overall_assessment": {"overall_sentiment": "Positive"}}),
            analysis_timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn numbers_analyses_in_order() {
        let rows = vec![
            row(1, "First review", "iPhone 15 Pro"),
            row(2, "Second review", "iPhone 15 Pro"),
        ];
        let block = format_analyses_block(&rows);
        let first = block.find("--- Review Analysis 1 ---").expect("first header");
        let second = block.find("--- Review Analysis 2 ---").expect("second header");
        assert!(first < second);
        assert!(block.contains("Video Title: First review"));
        assert!(block.contains("Video Published: 2023-10-05"));
        assert!(block.contains("\"overall_sentiment\": \"Positive\""));
    }

    #[test]
    fn missing_publish_date_renders_as_na() {
        let mut r = row(1, "Undated", "iPhone 15 Pro");
        r.video_published_at = None;
        let block = format_analyses_block(&[r]);
        assert!(block.contains("Video Published: N/A"));
    }

    #[test]
    fn detail_line_includes_year_and_count() {
        let product = revlens_core::ProductConfig {
            name: "iPhone 15 Pro".to_owned(),
            brand: "Apple".to_owned(),
            generation: Some("15".to_owned()),
            release_year: Some(2023),
            keywords: vec!["iPhone 15 Pro review".to_owned()],
            search_language: None,
            candidate_pool_size: None,
            full_analysis_cap: None,
        };
        assert_eq!(
            product_detail_line(&product, 4),
            "- iPhone 15 Pro (2023) - 4 reviews"
        );
    }
}
