pub mod transport;
pub mod video_service;
