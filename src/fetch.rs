//! HTTP fetching
//!
//! [`Fetcher`] is the only way the backup engine touches the network. Redirects are
//! never followed: the caller inspects them (a redirected profile page means the user
//! does not exist).

use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use tracing::debug;

/// A fetched document
#[derive(Clone, Debug)]
pub struct Response {
    /// URL the response came from
    pub url: String,
    /// HTTP status code (at most 400)
    pub status: u16,
    /// Decoded body
    pub body: String,
}

impl Response {
    /// Whether the server answered with a redirect
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// Capability to GET a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] when the request fails or times out
    /// - [`Error::HttpStatus`] when the status code is above 400
    async fn fetch(&self, url: &str) -> Result<Response>;
}

/// [`Fetcher`] backed by a shared `reqwest` client
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the configured timeout and user agent, redirects disabled
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {e}"),
                key: None,
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Response> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        if status > 400 {
            return Err(Error::HttpStatus {
                status,
                url: final_url,
            });
        }

        let body = response.text().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })?;

        Ok(Response {
            url: final_url,
            status,
            body,
        })
    }
}
