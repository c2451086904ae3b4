use crate::{shortener::LinkShortener, utils::Config};
use extractor::YtDlp;
use std::sync::Arc;

mod assembler;
pub mod extractor;
pub mod handler;
pub mod model;
mod utils;

pub const RESOLUTION_TIERS: [&str; 6] = ["144p", "240p", "360p", "480p", "720p", "1080p"];
pub const AUDIO_TAG: &str = "audio";
pub const CREATOR: &str = "AURTHER~آرثر";

pub async fn video_info(config: &Config, shortener: Arc<dyn LinkShortener>) -> handler::VideoInfo {
    let extractor = YtDlp::new(config.extractor.clone(), config.extractor_timeout);
    handler::VideoInfo::new(Arc::new(extractor), shortener)
}
