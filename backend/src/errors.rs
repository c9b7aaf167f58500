use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Every way a metadata request can fail. The `Display` text is what the
/// client sees in the `error` field of the response envelope.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("URL parameter is required")]
    MissingUrl,
    #[error("Invalid YouTube URL format")]
    InvalidUrl,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,
    #[error("Server configuration error")]
    MissingApiKey,
    #[error("API quota exceeded or invalid API key")]
    QuotaOrAuth,
    #[error("Video not found")]
    NotFound,
    #[error("Video not found or is private")]
    NotFoundOrPrivate,
    #[error("YouTube API error: {status} {status_text}")]
    Upstream { status: u16, status_text: String },
    #[error("Invalid response from YouTube API: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("Failed to reach YouTube API: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ExtractError {
    pub fn status(&self) -> Status {
        match self {
            ExtractError::MissingUrl | ExtractError::InvalidUrl => Status::BadRequest,
            ExtractError::PayloadTooLarge => Status::PayloadTooLarge,
            ExtractError::MethodNotAllowed => Status::MethodNotAllowed,
            _ => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ExtractError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        (status, Json(ErrorResponse::new(self.to_string()))).respond_to(request)
    }
}
