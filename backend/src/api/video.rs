use crate::errors::ExtractError;
use crate::models::{ErrorResponse, ExtractRequest, MetadataEnvelope};
use crate::utils::{current_timestamp, extract_youtube_video_id};
use crate::AppState;
use log::{error, info};
use rocket::http::{Method, Status};
use rocket::serde::json::{self, Json};
use rocket::{catch, options, post, Request, State};
use std::io;

#[options("/<_..>")]
pub fn preflight() {}

#[post("/<_..>", data = "<request>")]
pub async fn extract_metadata(
    state: &State<AppState>,
    request: Result<Json<ExtractRequest>, json::Error<'_>>,
) -> Result<Json<MetadataEnvelope>, ExtractError> {
    let body = match request {
        Ok(body) => Some(body.into_inner()),
        // Rocket reports a body over the `json` limit as a truncated read.
        Err(json::Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
            return Err(ExtractError::PayloadTooLarge);
        }
        Err(_) => None,
    };
    let url = body
        .and_then(|body| body.url)
        .filter(|url| !url.is_empty())
        .ok_or(ExtractError::MissingUrl)?;

    let video_id = extract_youtube_video_id(&url).ok_or_else(|| {
        info!("Rejected unrecognized YouTube URL: {url:?}");
        ExtractError::InvalidUrl
    })?;

    let api_key = state.config.youtube_api_key.as_deref().ok_or_else(|| {
        error!("YouTube API key is not configured");
        ExtractError::MissingApiKey
    })?;

    info!("Fetching metadata for video {video_id}");
    let metadata = state
        .fetcher
        .fetch(&video_id, api_key)
        .await
        .map_err(|e| {
            error!("Failed to fetch metadata for video {video_id}: {e}");
            e
        })?;

    Ok(Json(MetadataEnvelope::new(
        video_id,
        url,
        metadata,
        current_timestamp(),
    )))
}

/// Anything that is not POST or OPTIONS falls through every route, so the
/// catcher is where "wrong method" is answered.
#[catch(default)]
pub fn default_catcher(status: Status, request: &Request) -> (Status, Json<ErrorResponse>) {
    if !matches!(request.method(), Method::Post | Method::Options) {
        let error = ExtractError::MethodNotAllowed;
        return (error.status(), Json(ErrorResponse::new(error.to_string())));
    }
    let message = status.reason().unwrap_or("Request failed");
    (status, Json(ErrorResponse::new(message)))
}
