use serde::{Deserialize, Serialize};

/// Closed set of video-type labels the tier-1 classifier may assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoType {
    #[serde(rename = "In-depth Review/Critique")]
    InDepthReview,
    #[serde(rename = "Feature Showcase/Demo")]
    FeatureShowcase,
    #[serde(rename = "User Experience/Testimonial")]
    UserExperience,
    #[serde(rename = "Comparison")]
    Comparison,
    #[serde(rename = "Tutorial/How-To")]
    Tutorial,
    #[serde(rename = "News/Announcement")]
    News,
    #[serde(rename = "Marketing/Advertisement")]
    Marketing,
    #[serde(rename = "Webinar/Presentation")]
    Webinar,
    #[serde(rename = "Other")]
    Other,
    #[serde(rename = "Not Applicable")]
    NotApplicable,
}

impl VideoType {
    /// The label exactly as it appears in prompts and model responses.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::InDepthReview => "In-depth Review/Critique",
            Self::FeatureShowcase => "Feature Showcase/Demo",
            Self::UserExperience => "User Experience/Testimonial",
            Self::Comparison => "Comparison",
            Self::Tutorial => "Tutorial/How-To",
            Self::News => "News/Announcement",
            Self::Marketing => "Marketing/Advertisement",
            Self::Webinar => "Webinar/Presentation",
            Self::Other => "Other",
            Self::NotApplicable => "Not Applicable",
        }
    }
}

impl std::fmt::Display for VideoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier-1 verdict: is the video primarily about the product, and what
/// kind of video is it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Tier1Classification {
    pub is_relevant_to_product: bool,
    pub video_type: VideoType,
}

// --- generateContent wire types ---

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Part {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

impl Part {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub(crate) fn video(file_uri: impl Into<String>) -> Self {
        Self::FileData {
            file_data: FileData {
                mime_type: "video/mp4".to_owned(),
                file_uri: file_uri.into(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FileData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "fileUri")]
    pub file_uri: String,
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    pub text: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}
