#[deny(clippy::all)]
use anyhow::Context;
use dotenv::dotenv;
use poem::{
    http::StatusCode,
    listener::TcpListener,
    middleware::{CatchPanic, Tracing},
    Endpoint, EndpointExt, Response, Route, Server,
};
use poem_openapi::OpenApiService;
use shortener::TinyUrl;
use std::{any::Any, sync::Arc};
use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use utils::Config;

mod health;
mod shortener;
mod utils;
mod yt_dlp;

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .content_type("application/json")
        .body(r#"{"error":"Unexpected server error."}"#)
}

fn app(
    health_api: health::handler::HealthCheck,
    video_info_api: yt_dlp::handler::VideoInfo,
) -> impl Endpoint {
    let api_service = OpenApiService::new((health_api, video_info_api), "Video Info", "1.0");

    Route::new()
        .nest("/", api_service)
        .with(CatchPanic::new().with_handler(panic_response))
        .with(Tracing)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // This line loads the environment variables from the ".env" file.
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    let shortener = TinyUrl::new(
        config.shortener_endpoint.clone(),
        config.shortener_timeout,
    )
    .context("Failed to build HTTP client")?;

    let health_api = health::health_checks().await;
    let video_info_api = yt_dlp::video_info(&config, Arc::new(shortener)).await;

    info!(port = config.port, "Server is running on port {}", config.port);

    Server::new(TcpListener::bind(format!("0.0.0.0:{}", config.port)))
        .run_with_graceful_shutdown(
            app(health_api, video_info_api),
            async move {
                let _ = tokio::signal::ctrl_c().await;
            },
            Some(Duration::from_secs(5)),
        )
        .await?;

    Ok(())
}
