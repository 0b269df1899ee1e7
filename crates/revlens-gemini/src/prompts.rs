//! Prompt templates for the tiered filtering and full-analysis calls.
//!
//! Placeholders use `{name}` syntax and are filled by
//! [`crate::template::render_template`]. Literal braces in the JSON
//! structure examples survive rendering because only known placeholder
//! names are substituted.

/// Max characters of video description embedded in tier prompts.
pub(crate) const DESCRIPTION_SNIPPET_CHARS: usize = 500;

/// Max characters of video description embedded in the single-tier
/// relevance prompt used for curated reviewers.
pub(crate) const RELEVANCE_DESCRIPTION_CHARS: usize = 250;

/// Char-boundary-safe prefix of `s`, at most `max_chars` characters.
pub(crate) fn snippet(s: &str, max_chars: usize) -> &str {
    s.char_indices()
        .nth(max_chars)
        .map_or(s, |(idx, _)| &s[..idx])
}

/// Single-tier relevance check for videos from curated reviewer channels.
/// Expects a bare YES or NO.
pub(crate) const RELEVANCE_CHECK_TEMPLATE: &str = r#"
You are an assistant that determines if a YouTube video is a relevant, in-depth review or detailed hands-on analysis suitable for detailed feature extraction for consumer electronics like smartphones or laptops.
Do not consider short news segments, event recaps without product interaction, or very brief impression videos that lack substance for a full review analysis.
However, consider "X Months Later" reviews as relevant if they are substantial.

Video Title: "{video_title}"
Video Description (first 250 chars): "{video_description}"
Product we are interested in: "{product_name}"
Keywords associated with this product search: {product_keywords}

Based ONLY on the title and description, is this video likely to be a detailed review or substantial hands-on analysis of the specified product, suitable for extracting detailed opinions on its features, performance, and non-verbal cues from the reviewer?

Respond with ONLY "YES" or "NO".
"#;

/// Tier-1 classification for general-search candidates: product relevance
/// plus a closed video-type label, as a strict two-key JSON object.
pub(crate) const TIER1_CLASSIFICATION_TEMPLATE: &str = r#"
Product of Interest: "{product_name}"
Video Title: "{video_title}"
Channel Title: "{channel_title}"
Video Description (snippet): "{video_description}"

Based on the information above, please perform two tasks:
1.  Is this video PRIMARILY about the "{product_name}"? (Respond YES or NO)
2.  If YES to point 1, what is the MOST LIKELY primary type of this video? Choose ONE from the following categories:
    - "In-depth Review/Critique"
    - "Feature Showcase/Demo"
    - "User Experience/Testimonial"
    - "Comparison"
    - "Tutorial/How-To"
    - "News/Announcement"
    - "Marketing/Advertisement"
    - "Webinar/Presentation"
    - "Other"
    - "Not Applicable"

Respond ONLY with a JSON object with two keys: "is_relevant_to_product" (boolean) and "video_type" (string from the list above).
Ensure the "video_type" string exactly matches one of the provided categories.
Example: {"is_relevant_to_product": true, "video_type": "In-depth Review/Critique"}
"#;

/// Tier-2 suitability check, conditioned on the tier-1 video type.
/// Expects the exact token `YES_SUITABLE` or `NO_UNSUITABLE`.
pub(crate) const TIER2_SUITABILITY_TEMPLATE: &str = r#"
Product of Interest: "{product_name}"
Video Title: "{video_title}"
Channel Title: "{channel_title}"
Video Description (snippet): "{video_description}"
Previously Identified Video Type: "{video_type}"

Considering this video is about "{product_name}" and is of type "{video_type}", assess its suitability for a detailed sentiment and feature analysis.
The goal is to understand opinions on features, ease of use, pricing, support, pros, cons, and overall user experience.

We are looking for videos that offer substantive evaluative commentary or opinion.
- "In-depth Review/Critique", "User Experience/Testimonial", and "Comparison" videos are highly suitable.
- "Feature Showcase/Demo" and "Webinar/Presentation" are suitable if they go beyond pure feature listing and include evaluative context, user benefits, or address pain points.
- "Tutorial/How-To" videos are suitable ONLY if they embed significant evaluative commentary or opinions on the software's aspects, not just instructional steps.
- "Marketing/Advertisement" and "News/Announcement" are generally UNSUITABLE unless they contain substantial, verifiable user testimonials or detailed competitive differentiators that reflect user sentiment.

Is this video LIKELY to contain enough substantive evaluative commentary or opinion to be useful for a detailed analysis?
Respond with ONLY "YES_SUITABLE" or "NO_UNSUITABLE".
"#;

/// Full-analysis prompt wrapping a rendered JSON structure request. The
/// video itself travels as a separate file-data part.
pub(crate) const FULL_ANALYSIS_TEMPLATE: &str = r#"
Analyze the provided YouTube video (URL: {video_url}) which is a review of the product: '{product_name}'.
The video may be in any language that you understand.
However, ALL extracted information and your entire response MUST be structured EXCLUSIVELY in JSON format, AND ALL TEXTUAL CONTENT WITHIN THE JSON (e.g., summaries, comments, sentiments, feature names, quotes) MUST BE IN ENGLISH.

Be as specific as possible, basing your analysis ONLY on the content of the video, INCLUDING VISUAL AND AUDITORY CUES from the reviewer.
If a piece of information is not explicitly mentioned or clearly deducible from the video,
use the value null for non-string fields, an empty string "" for textual fields (unless specified otherwise for ENUMs), and an empty list [] for list fields.

When analyzing non-verbal cues:
- For 'overall_reviewer_demeanour', assess the reviewer's general attitude and energy throughout the video. PROVIDE THE ENUM VALUE IN ENGLISH.
- For 'notable_facial_expressions', identify up to 3 key moments where facial expressions strongly convey an opinion or reaction. Describe the context AND PROVIDE ALL TEXT IN ENGLISH.
- For 'tone_of_voice_analysis', describe shifts in vocal tone during different segments that indicate enthusiasm, disappointment, sarcasm, etc. PROVIDE ALL TEXT IN ENGLISH.
- For 'gestures_and_body_language', highlight any significant gestures or body language that reinforce or contradict spoken words. PROVIDE ALL TEXT IN ENGLISH.

The requested JSON structure is as follows, AND ALL STRING VALUES WITHIN IT MUST BE IN ENGLISH:
{json_structure_request}
"#;

/// JSON structure requested from the model for consumer-product reviews
/// (curated reviewer channels).
pub(crate) const CONSUMER_JSON_STRUCTURE: &str = r#"
{
    "video_metadata": {
        "video_url": "{video_url}",
        "video_title": "{video_title}",
        "channel_name": "{channel_name}",
        "product_reviewed": "{product_name}"
    },
    "overall_assessment": {
        "overall_sentiment": "ENUM('Positive', 'Negative', 'Mixed', 'Neutral')",
        "sentiment_score_numeric": "FLOAT (optional, from -1.0 to 1.0, or null)",
        "summary_review": "STRING (Brief 2-3 sentence summary of the reviewer's conclusion)",
        "key_positive_takeaways": ["STRING (Positive takeaway 1)"],
        "key_negative_takeaways": ["STRING (Negative takeaway 1)"]
    },
    "feature_analysis": [
        {
            "feature_name": "STRING (e.g., Camera, Battery, Design, Display, Performance, Software)",
            "sentiment": "ENUM('Very Positive', 'Positive', 'Neutral', 'Negative', 'Very Negative', 'Mixed', 'Not Mentioned')",
            "specific_comments": "STRING (Specific comments or justifications for the sentiment on this feature)",
            "key_quote_feature": "STRING (Significant quote related to this feature, or empty string)"
        }
    ],
    "pricing_and_value": {
        "price_mention": "BOOLEAN (Was the price mentioned?)",
        "price_currency": "STRING (e.g., USD, EUR, or empty string if not mentioned)",
        "price_amount": "FLOAT (numeric price, or null if not mentioned/applicable)",
        "price_sentiment": "ENUM('Positive', 'Negative', 'Neutral', 'Justified', 'Too High', 'Good Value', 'Not Mentioned')",
        "value_for_money_assessment": "STRING (Reviewer's comment on value for money)"
    },
    "comparison_context": {
        "vs_previous_generation": {
            "mentioned": "BOOLEAN",
            "previous_product_name": "STRING (Name of previous gen product, or empty string)",
            "key_differences_highlighted": "STRING (Main differences/improvements/drawbacks vs. previous gen)",
            "overall_comparison_sentiment": "ENUM('Improvement', 'Regression', 'Similar', 'Different but not comparable', 'Not Mentioned')"
        },
        "vs_competitors": [
            {
                "competitor_name": "STRING (Name of mentioned competitor)",
                "comparison_points": "STRING (What aspects were compared)",
                "outcome": "STRING (Who performed better on those points, according to the reviewer)"
            }
        ]
    },
    "brand_perception": {
        "brand_sentiment": "ENUM('Positive', 'Negative', 'Neutral', 'Not Mentioned')",
        "brand_related_comments": "STRING (Specific comments about the manufacturer brand)"
    },
    "target_audience": {
        "suggested_by_reviewer": "STRING (Who does the reviewer recommend this product to?)"
    },
    "non_verbal_cues": {
        "overall_reviewer_demeanour": "ENUM('Enthusiastic', 'Neutral', 'Sceptical', 'Disappointed', 'Excited', 'Measured', 'Professional', 'Casual', 'Not Clear')",
        "demeanour_justification": "STRING (Briefly explain the demeanour choice based on visual/tonal cues)",
        "notable_facial_expressions": [
            {
                "expression_type": "ENUM('Smile', 'Frown', 'Surprise', 'Raised Eyebrows', 'Eye Roll', 'Neutral', 'Concentration', 'Other')",
                "context_description": "STRING (What was being discussed or shown when this expression occurred?)",
                "perceived_implication": "STRING (What might this expression imply about the reviewer's feeling/opinion on that specific point?)"
            }
        ],
        "tone_of_voice_analysis": [
            {
                "segment_description": "STRING (Describe the part of the review this tone applies to)",
                "tone_observed": "ENUM('Excited', 'Monotone', 'Sarcastic', 'Genuine', 'Hesitant', 'Confident', 'Frustrated', 'Authoritative', 'Not Clear')",
                "key_tonal_indicators": "STRING (e.g., 'upward inflection', 'fast pace', 'low pitch', 'pauses')"
            }
        ],
        "gestures_and_body_language": [
            {
                "gesture_description": "STRING (e.g., 'emphatic hand gestures', 'leaning forward', 'shrugging shoulders')",
                "context_description": "STRING (What was being discussed when this gesture was prominent?)",
                "perceived_implication": "STRING (What might this gesture imply about engagement or conviction?)"
            }
        ]
    },
    "additional_elements": {
        "key_quote_overall_positive": "STRING (A representative overall positive quote, or empty string)",
        "key_quote_overall_negative": "STRING (A representative overall negative quote, or empty string)",
        "notable_mentions": ["STRING (Other noteworthy aspects not covered above)"]
    }
}
"#;

/// JSON structure requested from the model for business-software reviews
/// (general-search categories).
pub(crate) const BUSINESS_JSON_STRUCTURE: &str = r#"
{
    "video_metadata": {
        "video_url": "{video_url}",
        "video_title": "{video_title}",
        "channel_name": "{channel_name}",
        "video_type_assessment_by_ai": "ENUM('Independent Review', 'Vendor Demo', 'User Testimonial', 'Consultant Analysis', 'Comparison', 'Tutorial with Opinions', 'Other')",
        "product_analyzed": "{product_name}"
    },
    "overall_assessment": {
        "overall_sentiment": "ENUM('Very Positive', 'Positive', 'Neutral', 'Mixed', 'Negative', 'Very Negative')",
        "executive_summary": "STRING (2-4 sentence summary of the video's main conclusions about the product, IN ENGLISH)",
        "target_business_profile": {
            "size": ["ENUM('Solopreneur', 'Small Business (1-50 employees)', 'Medium Business (51-500 employees)', 'Large Enterprise (500+ employees)', 'Not Specified')"],
            "industries": ["STRING (e.g., 'Retail', 'Tech Startups', 'Healthcare', 'Not Specified', IN ENGLISH)"],
            "specific_use_cases_highlighted": ["STRING (e.g., 'Lead Management for Sales Teams', IN ENGLISH)"]
        },
        "key_strengths_highlighted": ["STRING (Overall positive aspects, IN ENGLISH)"],
        "key_weaknesses_highlighted": ["STRING (Overall negative aspects, IN ENGLISH)"]
    },
    "feature_module_analysis": [
        {
            "feature_or_module_name": "STRING (e.g., 'Contact Management', 'Reporting Dashboard', 'Mobile App', IN ENGLISH)",
            "sentiment": "ENUM('Very Positive', 'Positive', 'Neutral', 'Mixed', 'Negative', 'Very Negative', 'Not Mentioned')",
            "functionality_description_summary": "STRING (Brief summary of what this feature does as explained/shown, IN ENGLISH)",
            "ease_of_use_comments": "STRING (Specific comments on usability of this feature, IN ENGLISH)",
            "integration_comments": "STRING (If applicable, comments on how this feature integrates with others, IN ENGLISH)",
            "key_quote_feature": "STRING (Significant quote about this feature, IN ENGLISH)"
        }
    ],
    "usability_and_ux": {
        "overall_ease_of_use_sentiment": "ENUM('Very Intuitive', 'Intuitive', 'Average Learning Curve', 'Complex/Steep Learning Curve', 'Frustrating', 'Not Discussed')",
        "ui_design_critique": "STRING (Comments on the user interface design, IN ENGLISH)",
        "navigation_comments": "STRING (Comments on ease of navigating the software, IN ENGLISH)",
        "onboarding_experience_mention": "STRING (Comments on initial setup or learning process, if any, IN ENGLISH)"
    },
    "pricing_and_value_perception": {
        "pricing_model_discussed": "STRING (e.g., 'Subscription per user', 'Tiered plans', 'Not Detailed', IN ENGLISH)",
        "price_point_sentiment": "ENUM('Excellent Value', 'Good Value', 'Fair Price', 'Expensive but Justified', 'Overpriced', 'Not Discussed')",
        "value_for_money_assessment": "STRING (Overall comment on value relative to cost/features, IN ENGLISH)",
        "hidden_costs_or_upsells_mentioned": "BOOLEAN"
    },
    "customer_support_and_resources": {
        "support_quality_mention": "STRING (Comments on customer support responsiveness/helpfulness, IN ENGLISH)",
        "documentation_quality_mention": "STRING (Comments on help docs, tutorials, community forums, IN ENGLISH)",
        "sentiment": "ENUM('Excellent', 'Good', 'Adequate', 'Poor', 'Not Mentioned')"
    },
    "implementation_and_customization": {
        "implementation_complexity_mention": "STRING (Comments on how easy/hard it is to set up, IN ENGLISH)",
        "customization_capabilities_mention": "STRING (Comments on how well it can be tailored to specific needs, IN ENGLISH)",
        "sentiment": "ENUM('Highly Flexible', 'Moderately Flexible', 'Limited Flexibility', 'Rigid', 'Not Mentioned')"
    },
    "performance_and_reliability": {
        "speed_and_responsiveness_comments": "STRING (IN ENGLISH)",
        "uptime_or_bug_mentions": "STRING (IN ENGLISH)",
        "sentiment": "ENUM('Excellent', 'Good', 'Acceptable', 'Problematic', 'Not Mentioned')"
    },
    "comparison_to_alternatives": [
        {
            "competitor_name": "STRING (IN ENGLISH)",
            "compared_on_aspects": ["STRING (e.g., 'Pricing', 'Ease of Use', IN ENGLISH)"],
            "comparative_outcome_summary": "STRING ({product_name} was considered better/worse/different because..., IN ENGLISH)"
        }
    ],
    "non_verbal_cues_presenter": {
        "presenter_type": "ENUM('Likely Vendor Employee', 'Consultant/Expert', 'User', 'Unclear', 'N/A if no clear presenter')",
        "overall_presentation_style": "ENUM('Enthusiastic Demo', 'Objective Analysis', 'Personal Story', 'Formal Presentation', 'Instructional', 'N/A')",
        "confidence_in_statements_visual_tonal": "ENUM('High', 'Medium', 'Low', 'Mixed', 'Not Applicable', 'N/A')",
        "notable_expressions_or_tone_shifts": ["STRING (Describe key moments and perceived meaning, IN ENGLISH)"]
    },
    "final_recommendation_summary": {
        "recommendation_level": "ENUM('Highly Recommend', 'Recommend', 'Recommend with Caveats', 'Consider Alternatives', 'Do Not Recommend', 'No Clear Recommendation')",
        "ideal_user_profile_summary": "STRING (Who would benefit most, according to the video, IN ENGLISH)"
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::snippet;

    #[test]
    fn snippet_shorter_than_limit_is_unchanged() {
        assert_eq!(snippet("short", 500), "short");
    }

    #[test]
    fn snippet_truncates_at_char_boundary() {
        // 4 chars, 2 bytes each
        assert_eq!(snippet("ééééé", 4), "éééé");
    }
}
