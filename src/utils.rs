use anyhow::Context;
use poem::Error as PoemError;
use poem_openapi::{
    error::ParseParamError,
    payload::{Json, PlainText},
    {ApiResponse, Object, Tags},
};
use serde::Serialize;
use std::{env, time::Duration};
use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_EXTRACTOR: &str = "yt-dlp";
pub const DEFAULT_SHORTENER_ENDPOINT: &str = "https://tinyurl.com/api-create.php";

#[derive(Tags)]
pub enum ApiTags {
    /// Health check endpoints
    HealthCheck,
    /// Video metadata and download links
    VideoInfo,
}

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Extractor executable, resolved through `PATH` when not absolute
    pub extractor: String,
    pub extractor_timeout: Option<Duration>,
    pub shortener_endpoint: Url,
    pub shortener_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", port))?,
            None => DEFAULT_PORT,
        };

        let extractor = lookup("YT_DLP_PATH").unwrap_or_else(|| DEFAULT_EXTRACTOR.to_string());

        let endpoint =
            lookup("SHORTENER_ENDPOINT").unwrap_or_else(|| DEFAULT_SHORTENER_ENDPOINT.to_string());
        let shortener_endpoint = Url::parse(&endpoint)
            .with_context(|| format!("SHORTENER_ENDPOINT is not a valid URL: {}", endpoint))?;

        Ok(Config {
            port,
            extractor,
            extractor_timeout: parse_timeout(&lookup, "YT_DLP_TIMEOUT_SECS")?,
            shortener_endpoint,
            shortener_timeout: parse_timeout(&lookup, "SHORTENER_TIMEOUT_SECS")?,
        })
    }
}

fn parse_timeout<F>(lookup: &F, key: &str) -> anyhow::Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => {
            let secs: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", key))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        None => Ok(None),
    }
}

#[derive(Object, Debug)]
pub struct ErrorObject {
    error: String,
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "bad_request_handler")]
pub enum JsonResponse {
    /// Pretty-printed JSON document
    #[oai(status = 200, content_type = "application/json")]
    Ok(PlainText<String>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorObject>),
    #[oai(status = 500)]
    InternalServerError(Json<ErrorObject>),
}

impl JsonResponse {
    pub fn pretty<T: Serialize>(document: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string_pretty(document)?;
        Ok(JsonResponse::Ok(PlainText(body)))
    }

    pub fn bad_request(error: impl ToString) -> Self {
        JsonResponse::BadRequest(Json(ErrorObject {
            error: error.to_string(),
        }))
    }

    pub fn internal_server_error(error: impl ToString) -> Self {
        JsonResponse::InternalServerError(Json(ErrorObject {
            error: error.to_string(),
        }))
    }
}

fn bad_request_handler(err: PoemError) -> JsonResponse {
    if err.is::<ParseParamError>() {
        JsonResponse::bad_request(err.to_string())
    } else {
        JsonResponse::internal_server_error(err.to_string())
    }
}
