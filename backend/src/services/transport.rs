use reqwest::Client;
use url::Url;

use crate::errors::ExtractError;

/// Raw upstream reply. The status is inspected before the body is parsed.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[rocket::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, ExtractError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        ReqwestTransport { client }
    }
}

#[rocket::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, ExtractError> {
        // The request URL carries the API key; keep it out of error text.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();

        Ok(UpstreamResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body: response.text().await.map_err(reqwest::Error::without_url)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rocket::async_test]
    async fn unreachable_upstream_error_hides_request_url() {
        let transport = ReqwestTransport::new(Client::new());
        let url = Url::parse("http://127.0.0.1:1/videos?id=dQw4w9WgXcQ&key=SUPER_SECRET_KEY").unwrap();

        let err = transport.get(&url).await.unwrap_err();
        assert!(matches!(err, ExtractError::Transport(_)));
        let message = err.to_string();
        assert!(message.starts_with("Failed to reach YouTube API"), "{message}");
        assert!(!message.contains("SUPER_SECRET_KEY"), "{message}");
        assert!(!message.contains("127.0.0.1"), "{message}");
    }
}
