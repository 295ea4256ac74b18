//! List backup

use super::Backup;
use crate::backend::Backend;
use crate::error::{Error, ParseError, Result};
use crate::pagination::{LIST_PAGE_SIZE, list_page_url, remaining_pages};
use crate::parser::{self, Document};
use crate::types::{Entry, List};
use tracing::{debug, info};

/// What the first page of a list tells us
struct ListHead {
    size: usize,
    title: Option<String>,
    description: Option<String>,
    entries: Vec<Entry>,
}

fn list_head(document: &Document) -> std::result::Result<ListHead, ParseError> {
    Ok(ListHead {
        size: parser::list_size(document)?,
        title: parser::list_title(document)?,
        description: parser::list_description(document)?,
        entries: parser::entries(document)?,
    })
}

impl Backup {
    /// Back up the list at `url` and save it to `backend`
    ///
    /// The list is saved only when the number of retrieved entries matches the count
    /// the list declares.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `url` is not an absolute URL
    /// - [`Error::EmptyListTitle`] if the page has no list title
    /// - [`Error::CountMismatch`] if entries went missing during pagination
    /// - any fetch, parse or backend error
    pub async fn run_list(&self, url: &str, backend: &dyn Backend) -> Result<()> {
        let url = url.trim();
        url::Url::parse(url).map_err(|e| Error::InvalidInput {
            message: format!("invalid list url {url}: {e}"),
        })?;

        info!(url, location = %backend.location(), "backing up list");
        backend.create().await?;

        let head = self.fetch_document(url, list_head).await?;
        let title = head.title.ok_or_else(|| Error::EmptyListTitle {
            url: url.to_string(),
        })?;
        debug!(title = %title, declared = head.size, "parsed list head");

        let urls = remaining_pages(head.size, LIST_PAGE_SIZE)
            .map(|page| list_page_url(url, page))
            .collect();
        let entries = self.paginate(head.entries, urls, parser::entries).await?;

        if entries.len() != head.size {
            return Err(Error::CountMismatch {
                title,
                declared: head.size,
                found: entries.len(),
            });
        }

        let list = List::new(title, head.description, entries);
        backend.save(&list).await
    }
}
