//! Synthesis prompt templates.
//!
//! All three ask for the same two-part response shape the parser in
//! `revlens-gemini` expects: a `Part 1: Textual Summary` prose section and
//! a `Part 2: Structured JSON Output` object.

pub(crate) const LONGITUDINAL_TEMPLATE: &str = r#"
You are a senior product analyst. Below are structured analyses extracted from YouTube reviews covering successive generations of {brand_name} products:
{product_details}

Review Analyses:
{analyses}

Synthesize these analyses into a longitudinal view of how the product line and its reception evolved across generations. Focus on: recurring strengths and weaknesses, features that improved or regressed over time, shifts in reviewer sentiment, pricing and value trajectory, and brand perception.

Structure your response in EXACTLY two parts, with these exact headings.

Part 1: Textual Summary
A well-organized prose summary of the evolution story (IN ENGLISH), 4-8 paragraphs.

Part 2: Structured JSON Output
A single JSON object with this shape:
{
    "brand": "{brand_name}",
    "generations": [
        {
            "product_name": "STRING",
            "overall_reception": "ENUM('Very Positive', 'Positive', 'Mixed', 'Negative', 'Very Negative')",
            "standout_strengths": ["STRING"],
            "standout_weaknesses": ["STRING"],
            "notable_changes_vs_previous": ["STRING"]
        }
    ],
    "long_term_trends": ["STRING"],
    "recurring_criticisms": ["STRING"]
}
"#;

pub(crate) const COMPARATIVE_TEMPLATE: &str = r#"
You are a senior product analyst. Below are structured analyses extracted from YouTube reviews of competing products ({comparison_title}):
{product_details}

Review Analyses:
{analyses}

Synthesize these analyses into a comparative assessment. Weigh the products against each other on the aspects reviewers actually discussed: features, usability, pricing and value, reliability, and who each product serves best. Note where the review base is thin so conclusions are not overstated.

Structure your response in EXACTLY two parts, with these exact headings.

Part 1: Textual Summary
A well-organized prose comparison (IN ENGLISH), 4-8 paragraphs, ending with a verdict on which product suits which kind of buyer.

Part 2: Structured JSON Output
A single JSON object with this shape:
{
    "comparison_title": "{comparison_title}",
    "products": [
        {
            "product_name": "STRING",
            "overall_sentiment": "ENUM('Very Positive', 'Positive', 'Mixed', 'Negative', 'Very Negative')",
            "key_strengths": ["STRING"],
            "key_weaknesses": ["STRING"],
            "best_for": "STRING"
        }
    ],
    "head_to_head_findings": ["STRING"],
    "data_caveats": ["STRING"]
}
"#;

pub(crate) const DEEP_DIVE_TEMPLATE: &str = r#"
You are a senior product analyst. Below are structured analyses extracted from {review_count} YouTube reviews of a single product:
{product_details}

Review Analyses:
{analyses}

Synthesize these analyses into a deep-dive assessment of "{product_name}". Cover: overall reception, the features reviewers praised or criticized most (with how consistently each came up), usability and learning curve, pricing and value perception, reliability concerns, and who the product serves best. Where reviewers disagree, say so rather than averaging them away.

Structure your response in EXACTLY two parts, with these exact headings.

Part 1: Textual Summary
A well-organized prose deep dive (IN ENGLISH), 4-8 paragraphs, ending with the profile of the buyer this product fits.

Part 2: Structured JSON Output
A single JSON object with this shape:
{
    "product_name": "{product_name}",
    "reviews_used": {review_count},
    "overall_sentiment": "ENUM('Very Positive', 'Positive', 'Mixed', 'Negative', 'Very Negative')",
    "consensus_strengths": ["STRING"],
    "consensus_weaknesses": ["STRING"],
    "contested_points": ["STRING (aspects reviewers disagreed on, and how)"],
    "pricing_and_value_verdict": "STRING",
    "ideal_buyer_profile": "STRING",
    "recommendation_level": "ENUM('Highly Recommend', 'Recommend', 'Recommend with Caveats', 'Consider Alternatives', 'Do Not Recommend')"
}
"#;

pub(crate) const CATEGORY_FACTORS_TEMPLATE: &str = r#"
You are a senior market analyst. Below are structured analyses extracted from YouTube reviews of products in the "{category_name}" category:
{product_details}

Review Analyses:
{analyses}

From these analyses, identify the key buying factors in this category: the aspects reviewers consistently treat as decisive when judging these products, and how the covered products perform on each.

Structure your response in EXACTLY two parts, with these exact headings.

Part 1: Textual Summary
A well-organized prose summary (IN ENGLISH) of what matters most to buyers in this category and why, 3-6 paragraphs.

Part 2: Structured JSON Output
A single JSON object with this shape:
{
    "category": "{category_name}",
    "key_buying_factors": [
        {
            "factor_name": "STRING",
            "why_it_matters": "STRING",
            "products_that_excel": ["STRING"],
            "products_that_lag": ["STRING"]
        }
    ],
    "category_wide_observations": ["STRING"]
}
"#;

#[cfg(test)]
mod tests {
    use revlens_gemini::render_plain;

    use super::*;

    #[test]
    fn longitudinal_prompt_keeps_both_part_markers() {
        let prompt = render_plain(
            LONGITUDINAL_TEMPLATE,
            &[
                ("brand_name", "Apple"),
                ("product_details", "- iPhone 15 Pro (2023) - 4 reviews"),
                ("analyses", "--- Review Analysis 1 ---"),
            ],
        );
        assert!(prompt.contains("Part 1: Textual Summary"));
        assert!(prompt.contains("Part 2: Structured JSON Output"));
        assert!(prompt.contains("\"brand\": \"Apple\""));
        assert!(!prompt.contains("{brand_name}"));
    }

    #[test]
    fn deep_dive_prompt_embeds_product_and_review_count() {
        let prompt = render_plain(
            DEEP_DIVE_TEMPLATE,
            &[
                ("product_name", "HubSpot CRM Suite"),
                ("product_details", "- HubSpot CRM Suite (N/A) - 3 reviews"),
                ("review_count", "3"),
                ("analyses", "--- Review Analysis 1 ---"),
            ],
        );
        assert!(prompt.contains("Part 1: Textual Summary"));
        assert!(prompt.contains("Part 2: Structured JSON Output"));
        assert!(prompt.contains("\"product_name\": \"HubSpot CRM Suite\""));
        assert!(prompt.contains("\"reviews_used\": 3"));
        assert!(!prompt.contains("{review_count}"));
    }

    #[test]
    fn category_prompt_embeds_the_category_name() {
        let prompt = render_plain(
            CATEGORY_FACTORS_TEMPLATE,
            &[
                ("category_name", "saas_crm"),
                ("product_details", "- Acme CRM (2024) - 2 reviews"),
                ("analyses", "--- Review Analysis 1 ---"),
            ],
        );
        assert!(prompt.contains("\"category\": \"saas_crm\""));
    }
}
