use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Rewrites long media URLs into short redirect links.
///
/// Shortening is cosmetic: implementations never fail, they hand back the
/// input unchanged when the service cannot be reached.
#[async_trait]
pub trait LinkShortener: Send + Sync {
    async fn shorten(&self, long_url: &str) -> String;
}

/// TinyURL style service: `GET <endpoint>?url=<encoded>` answers with the
/// short link as the raw body.
pub struct TinyUrl {
    client: Client,
    endpoint: Url,
}

impl TinyUrl {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// Appends `url=<encoded>` after any query already on the endpoint.
    fn request_url(&self, long_url: &str) -> Url {
        let param = format!("url={}", urlencoding::encode(long_url));
        let query = match self.endpoint.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, param),
            _ => param,
        };
        let mut url = self.endpoint.clone();
        url.set_query(Some(&query));
        url
    }

    async fn try_shorten(&self, long_url: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .get(self.request_url(long_url))
            .send()
            .await?
            .error_for_status()?;
        response.text().await
    }
}

#[async_trait]
impl LinkShortener for TinyUrl {
    async fn shorten(&self, long_url: &str) -> String {
        match self.try_shorten(long_url).await {
            Ok(short) => {
                debug!(url = %long_url, short = %short, "Shortened link");
                short
            }
            Err(error) => {
                warn!(url = %long_url, error = %error, "Failed to shorten link");
                long_url.to_string()
            }
        }
    }
}
