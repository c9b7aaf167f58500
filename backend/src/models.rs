use rocket::serde::{Deserialize, Serialize};

pub const CONTENT_TYPE_YOUTUBE: &str = "youtube";

#[derive(Debug, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub channel_id: String,
    pub published_at: String, // ISO 8601
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub duration: String, // ISO 8601 duration, e.g. PT3M33S
    pub view_count: u64,
    pub like_count: u64,
    pub tags: Vec<String>,
}

/// Success body: request echo fields merged with the fetched metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEnvelope {
    pub success: bool,
    pub video_id: String,
    pub url: String,
    pub content_type: &'static str,
    #[serde(flatten)]
    pub metadata: VideoMetadata,
    pub extracted_at: String,
}

impl MetadataEnvelope {
    pub fn new(video_id: String, url: String, metadata: VideoMetadata, extracted_at: String) -> Self {
        MetadataEnvelope {
            success: true,
            video_id,
            url,
            content_type: CONTENT_TYPE_YOUTUBE,
            metadata,
            extracted_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            error: error.into(),
        }
    }
}
