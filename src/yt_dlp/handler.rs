use super::{assembler::assemble, extractor::Extractor, utils::query_param};
use crate::{
    shortener::LinkShortener,
    utils::{ApiTags, JsonResponse},
};
use poem::Request;
use poem_openapi::{param::Query, OpenApi};
use std::sync::Arc;
use tracing::{error, info};

pub const MISSING_URL: &str = "No video URL provided.";
pub const INVALID_URL: &str = "Video URL is not valid UTF-8.";
pub const UNEXPECTED: &str = "Unexpected server error.";

pub struct VideoInfo {
    extractor: Arc<dyn Extractor>,
    shortener: Arc<dyn LinkShortener>,
}

#[OpenApi(tag = "ApiTags::VideoInfo")]
impl VideoInfo {
    pub fn new(extractor: Arc<dyn Extractor>, shortener: Arc<dyn LinkShortener>) -> Self {
        Self {
            extractor,
            shortener,
        }
    }

    /// Video metadata with shortened download links per resolution
    #[oai(
        path = "/api/getVideoInfo",
        method = "get",
        operation_id = "video_info::get_video_info"
    )]
    async fn get_video_info(
        &self,
        req: &Request,
        #[oai(name = "url")] _url: Query<Option<String>>,
    ) -> JsonResponse {
        // The typed parameter replaces undecodable bytes, so the raw query is read instead.
        let url = match query_param(req.uri().query(), "url") {
            Some(Ok(url)) if !url.is_empty() => url,
            Some(Err(error)) => {
                error!(error = %error, "Video URL is not valid UTF-8");
                return JsonResponse::bad_request(INVALID_URL);
            }
            _ => return JsonResponse::bad_request(MISSING_URL),
        };

        info!(url = %url, "Fetching video info");

        let metadata = match self.extractor.extract(&url).await {
            Ok(metadata) => metadata,
            Err(error) => {
                error!(url = %url, error = %error, "Failed to extract video info");
                return JsonResponse::internal_server_error(error.client_message());
            }
        };

        let document = assemble(metadata, self.shortener.as_ref()).await;

        match JsonResponse::pretty(&document) {
            Ok(response) => response,
            Err(error) => {
                error!(url = %url, error = %error, "Failed to serialize video info");
                JsonResponse::internal_server_error(UNEXPECTED)
            }
        }
    }
}
