//! Collection backup

use super::Backup;
use super::journal::reconcile_done_dates;
use crate::backend::Backend;
use crate::error::{Error, ParseError, Result};
use crate::pagination::{
    COLLECTION_PAGE_SIZE, collection_page_url, collection_url, profile_url, remaining_pages,
};
use crate::parser::{self, Document};
use crate::types::{Category, Collection, Entry, Filter, JournalEntry};
use tokio::sync::OnceCell;
use tracing::{debug, info};

impl Backup {
    /// Back up every configured category and filter of `username` to `backend`
    ///
    /// Categories are processed one after another, each filter in turn; only the pages
    /// of a single result set are fetched concurrently. The journal is downloaded the
    /// first time a `done` result set needs completion dates, then reused for the rest
    /// of the run. A run configured with the `wish` filter alone never touches it.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `username` is empty or not a single path segment
    /// - [`Error::UserNotFound`] if the profile page redirects
    /// - any backend, fetch or parse error; result sets saved before the failure stay saved
    pub async fn run_collection(&self, username: &str, backend: &dyn Backend) -> Result<()> {
        let username = username.trim();
        if username.is_empty() || username.contains('/') {
            return Err(Error::InvalidInput {
                message: format!("invalid username {username:?}"),
            });
        }

        self.ensure_user_exists(username).await?;
        backend.create().await?;
        info!(username, location = %backend.location(), "backing up collection");

        let journal: OnceCell<Vec<JournalEntry>> = OnceCell::new();

        for &category in &self.config.categories {
            for &filter in &self.config.filters {
                let mut entries = self.collection_entries(username, category, filter).await?;

                if filter == Filter::Done {
                    let journal = journal
                        .get_or_try_init(|| self.fetch_journal(username))
                        .await?;
                    let matched = reconcile_done_dates(&mut entries, journal);
                    debug!(%category, matched, "reconciled done dates");
                }

                let collection = Collection::new(username, category, filter, entries);
                backend.save(&collection).await?;
            }
        }

        Ok(())
    }

    /// A profile page that redirects means the user does not exist or hides its profile
    async fn ensure_user_exists(&self, username: &str) -> Result<()> {
        let response = self
            .fetcher
            .fetch(&profile_url(self.config.base(), username))
            .await?;

        if response.is_redirect() {
            return Err(Error::UserNotFound {
                username: username.to_string(),
            });
        }
        Ok(())
    }

    async fn collection_entries(
        &self,
        username: &str,
        category: Category,
        filter: Filter,
    ) -> Result<Vec<Entry>> {
        let prefix = collection_url(self.config.base(), username, category, filter);

        let (size, first_page) = self
            .fetch_document(
                &prefix,
                |document: &Document| -> std::result::Result<_, ParseError> {
                    Ok((
                        parser::collection_size(document, filter)?,
                        parser::entries(document)?,
                    ))
                },
            )
            .await?;
        debug!(%category, %filter, declared = size, "parsed first collection page");

        let urls = remaining_pages(size, COLLECTION_PAGE_SIZE)
            .map(|page| collection_page_url(&prefix, page))
            .collect();
        self.paginate(first_page, urls, parser::entries).await
    }
}
