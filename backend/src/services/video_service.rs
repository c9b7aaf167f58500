use crate::errors::ExtractError;
use crate::models::VideoMetadata;
use crate::services::transport::HttpTransport;
use crate::utils::parse_count;
use log::{info, warn};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

pub const VIDEO_PARTS: &str = "snippet,contentDetails,statistics";

// Highest resolution first.
const THUMBNAIL_PREFERENCE: [&str; 5] = ["maxres", "standard", "high", "medium", "default"];

/// Looks up a single video on the YouTube Data API `videos` endpoint.
pub struct MetadataFetcher {
    transport: Arc<dyn HttpTransport>,
    api_url: Url,
}

impl MetadataFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, api_url: Url) -> Self {
        MetadataFetcher { transport, api_url }
    }

    pub fn request_url(&self, video_id: &str, api_key: &str) -> Url {
        // Documentation: https://developers.google.com/youtube/v3/docs/videos/list
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("part", VIDEO_PARTS)
            .append_pair("id", video_id)
            .append_pair("key", api_key);
        url
    }

    pub async fn fetch(&self, video_id: &str, api_key: &str) -> Result<VideoMetadata, ExtractError> {
        let response = self
            .transport
            .get(&self.request_url(video_id, api_key))
            .await?;

        match response.status {
            403 => {
                warn!("YouTube API rejected request for {video_id}: quota or key");
                return Err(ExtractError::QuotaOrAuth);
            }
            404 => return Err(ExtractError::NotFound),
            _ if !response.is_success() => {
                warn!(
                    "YouTube API returned {} {} for {video_id}",
                    response.status, response.status_text
                );
                return Err(ExtractError::Upstream {
                    status: response.status,
                    status_text: response.status_text,
                });
            }
            _ => {}
        }

        let body: Value = serde_json::from_str(&response.body)?;
        let item = body["items"]
            .as_array()
            .and_then(|items| items.first())
            .ok_or(ExtractError::NotFoundOrPrivate)?;

        let metadata = map_video_item(item);
        info!(
            "Fetched metadata for {video_id}: \"{}\" by {} ({} views)",
            metadata.title, metadata.channel_title, metadata.view_count
        );
        Ok(metadata)
    }
}

/// Flatten one `items[]` entry of a `videos.list` response.
pub fn map_video_item(item: &Value) -> VideoMetadata {
    let snippet = &item["snippet"];
    let text = |value: &Value| value.as_str().unwrap_or("").to_string();

    VideoMetadata {
        title: text(&snippet["title"]),
        description: text(&snippet["description"]),
        channel_title: text(&snippet["channelTitle"]),
        channel_id: text(&snippet["channelId"]),
        published_at: text(&snippet["publishedAt"]),
        thumbnail: THUMBNAIL_PREFERENCE
            .iter()
            .find_map(|size| snippet["thumbnails"][*size]["url"].as_str())
            .map(String::from),
        duration: text(&item["contentDetails"]["duration"]),
        view_count: parse_count(&item["statistics"]["viewCount"]),
        like_count: parse_count(&item["statistics"]["likeCount"]),
        tags: snippet["tags"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::stub::StubTransport;
    use serde_json::json;

    const API_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

    fn fetcher(stub: &Arc<StubTransport>) -> MetadataFetcher {
        MetadataFetcher::new(stub.clone(), Url::parse(API_URL).unwrap())
    }

    fn sample_item() -> Value {
        json!({
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "publishedAt": "2009-10-25T06:57:33Z",
                "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                "title": "Never Gonna Give You Up",
                "description": "The official video",
                "channelTitle": "Rick Astley",
                "tags": ["rick astley", "never gonna give you up"],
                "thumbnails": {
                    "default": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg" },
                    "high": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg" },
                    "maxres": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg" }
                }
            },
            "contentDetails": { "duration": "PT3M33S" },
            "statistics": { "viewCount": "1500000000", "likeCount": "17000000" }
        })
    }

    #[test]
    fn maps_full_item() {
        let metadata = map_video_item(&sample_item());
        assert_eq!(metadata.title, "Never Gonna Give You Up");
        assert_eq!(metadata.channel_title, "Rick Astley");
        assert_eq!(metadata.channel_id, "UCuAXFkgsw1L7xaCfnd5JJOw");
        assert_eq!(metadata.published_at, "2009-10-25T06:57:33Z");
        assert_eq!(metadata.duration, "PT3M33S");
        assert_eq!(metadata.view_count, 1_500_000_000);
        assert_eq!(metadata.like_count, 17_000_000);
        assert_eq!(metadata.tags.len(), 2);
        assert_eq!(
            metadata.thumbnail.as_deref(),
            Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg")
        );
    }

    #[test]
    fn thumbnail_falls_back_to_lower_resolution() {
        let mut item = sample_item();
        item["snippet"]["thumbnails"]
            .as_object_mut()
            .unwrap()
            .remove("maxres");
        let metadata = map_video_item(&item);
        assert_eq!(
            metadata.thumbnail.as_deref(),
            Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
        );
    }

    #[test]
    fn sparse_item_gets_defaults() {
        let metadata = map_video_item(&json!({
            "snippet": { "title": "Untitled" },
            "statistics": { "viewCount": "not a number" }
        }));
        assert_eq!(metadata.title, "Untitled");
        assert_eq!(metadata.description, "");
        assert_eq!(metadata.thumbnail, None);
        assert_eq!(metadata.view_count, 0);
        assert_eq!(metadata.like_count, 0);
        assert!(metadata.tags.is_empty());
    }

    #[test]
    fn request_url_carries_parts_id_and_key() {
        let stub = Arc::new(StubTransport::ok("{}"));
        let url = fetcher(&stub).request_url("dQw4w9WgXcQ", "secret-key");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("part".to_string(), VIDEO_PARTS.to_string()),
                ("id".to_string(), "dQw4w9WgXcQ".to_string()),
                ("key".to_string(), "secret-key".to_string()),
            ]
        );
        assert_eq!(url.path(), "/youtube/v3/videos");
    }

    #[rocket::async_test]
    async fn fetch_maps_success() {
        let stub = Arc::new(StubTransport::ok(json!({ "items": [sample_item()] }).to_string()));
        let metadata = fetcher(&stub).fetch("dQw4w9WgXcQ", "key").await.unwrap();
        assert_eq!(metadata.title, "Never Gonna Give You Up");
        assert_eq!(stub.calls().len(), 1);
    }

    #[rocket::async_test]
    async fn fetch_classifies_status_codes() {
        let cases = [
            (403, "Forbidden", "API quota exceeded or invalid API key"),
            (404, "Not Found", "Video not found"),
            (500, "Internal Server Error", "YouTube API error: 500 Internal Server Error"),
        ];
        for (status, text, expected) in cases {
            let stub = Arc::new(StubTransport::new(status, text, "not json"));
            let err = fetcher(&stub).fetch("dQw4w9WgXcQ", "key").await.unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
    }

    #[rocket::async_test]
    async fn fetch_treats_empty_items_as_private() {
        for body in [json!({ "items": [] }), json!({ "kind": "youtube#videoListResponse" })] {
            let stub = Arc::new(StubTransport::ok(body.to_string()));
            let err = fetcher(&stub).fetch("dQw4w9WgXcQ", "key").await.unwrap_err();
            assert!(matches!(err, ExtractError::NotFoundOrPrivate));
        }
    }

    #[rocket::async_test]
    async fn fetch_rejects_non_json_body() {
        let stub = Arc::new(StubTransport::ok("<html>oops</html>"));
        let err = fetcher(&stub).fetch("dQw4w9WgXcQ", "key").await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidResponse(_)));
    }
}
