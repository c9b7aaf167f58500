#[macro_use]
extern crate rocket;

mod api;
mod config;
mod errors;
mod models;
mod services;
mod utils;

use crate::config::{AppConfig, Cors};
use crate::services::transport::ReqwestTransport;
use crate::services::video_service::MetadataFetcher;
use anyhow::Result;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub struct AppState {
    pub config: AppConfig,
    pub fetcher: MetadataFetcher,
}

pub fn create_app_state(config: AppConfig) -> Result<AppState> {
    let transport = ReqwestTransport::new(config::create_http_client()?);
    let fetcher = MetadataFetcher::new(Arc::new(transport), config.youtube_api_url.clone());

    Ok(AppState { config, fetcher })
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .attach(Cors)
        .mount("/", routes![api::preflight, api::extract_metadata])
        .register("/", catchers![api::default_catcher])
}

#[rocket::main]
async fn main() -> Result<()> {
    config::load_environment();
    config::init_logger();

    let state = create_app_state(config::load_config()?)?;

    build_rocket(state)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed: {e}"))?;
    Ok(())
}
