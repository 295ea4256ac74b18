//! Backup engine split into focused submodules.
//!
//! The `Backup` struct and its methods are organized by flow:
//! - [`list`] - Single list backup with count validation
//! - [`collection`] - Per-category, per-filter collection backup
//! - [`journal`] - Journal download and done-date reconciliation

mod collection;
mod journal;
mod list;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

pub use journal::reconcile_done_dates;

use crate::config::Config;
use crate::error::{Error, ParseError, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::parser::{Document, PageParser};
use crate::pool::{Pool, Task, merge};
use std::sync::Arc;
use tracing::debug;

/// Entry point for list and collection backups
///
/// Every HTTP request goes through the configured [`Fetcher`]; the first page of each
/// result set is fetched alone, the remaining pages are fanned out to a
/// [`Pool`](crate::pool::Pool) sized by [`Config::concurrency`].
#[derive(Clone)]
pub struct Backup {
    config: Config,
    fetcher: Arc<dyn Fetcher>,
}

impl Backup {
    /// Create a backup engine talking HTTP to `config.base_url`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self {
            config,
            fetcher: Arc::new(fetcher),
        })
    }

    /// Create a backup engine using a custom fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, fetcher })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch `url` and run `extract` on the parsed page
    async fn fetch_document<T, F>(&self, url: &str, extract: F) -> Result<T>
    where
        F: FnOnce(&Document) -> std::result::Result<T, ParseError>,
    {
        let response = self.fetcher.fetch(url).await?;
        let document = Document::parse(&response.body);
        extract(&document).map_err(|e| Error::parse(url, e))
    }

    /// Fetch every url in `urls` through the pool and append the records to `first_page`
    async fn paginate<T>(
        &self,
        first_page: Vec<T>,
        urls: Vec<String>,
        parse: PageParser<T>,
    ) -> Result<Vec<T>>
    where
        T: Send + 'static,
    {
        if urls.is_empty() {
            return Ok(first_page);
        }
        debug!(pages = urls.len(), "fetching remaining pages");

        let tasks = urls
            .into_iter()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                Task::new(move || async move { fetch_page(fetcher.as_ref(), &url, parse).await })
            })
            .collect();

        let outcomes = Pool::new(tasks, self.config.concurrency).run().await;
        merge(first_page, outcomes)
    }
}

async fn fetch_page<T>(fetcher: &dyn Fetcher, url: &str, parse: PageParser<T>) -> Result<Vec<T>> {
    let response = fetcher.fetch(url).await?;
    let document = Document::parse(&response.body);
    parse(&document).map_err(|e| Error::parse(url, e))
}
