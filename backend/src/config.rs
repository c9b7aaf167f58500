use anyhow::{Context, Result};
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Request, Response};
use std::env;
use url::Url;

pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const YOUTUBE_API_URL_VAR: &str = "YOUTUBE_API_URL";
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

/// Settings resolved once at startup and handed to the handlers as state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub youtube_api_key: Option<String>,
    pub youtube_api_url: Url,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            env::var(YOUTUBE_API_KEY_VAR).ok(),
            env::var(YOUTUBE_API_URL_VAR).ok(),
        )
    }

    pub fn from_values(api_key: Option<String>, api_url: Option<String>) -> Result<Self> {
        let youtube_api_key = api_key.filter(|key| !key.trim().is_empty());
        let raw_url = api_url.unwrap_or_else(|| DEFAULT_YOUTUBE_API_URL.to_string());
        let youtube_api_url = Url::parse(&raw_url)
            .with_context(|| format!("{YOUTUBE_API_URL_VAR} is not a valid URL: {raw_url}"))?;

        Ok(AppConfig {
            youtube_api_key,
            youtube_api_url,
        })
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting YouTube metadata proxy...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn load_config() -> Result<AppConfig> {
    let config = AppConfig::from_env()?;
    info!("Using YouTube API endpoint: {}", config.youtube_api_url);
    if config.youtube_api_key.is_none() {
        warn!("{YOUTUBE_API_KEY_VAR} is not set; metadata requests will fail until it is configured");
    }
    Ok(config)
}

pub fn create_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Adds the CORS headers to every response, preflight or not.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET,OPTIONS,POST",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "X-Requested-With, Content-Type, Accept",
        ));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}
