//! Journal download and done-date reconciliation

use super::Backup;
use crate::error::{ParseError, Result};
use crate::pagination::{JOURNAL_PAGE_SIZE, journal_page_url, journal_url, remaining_pages};
use crate::parser::{self, Document};
use crate::types::{Entry, JournalEntry};
use std::collections::HashMap;
use tracing::info;

fn journal_head(
    document: &Document,
) -> std::result::Result<(usize, Vec<JournalEntry>), ParseError> {
    Ok((
        parser::journal_size(document)?,
        parser::journal_entries(document)?,
    ))
}

impl Backup {
    /// Every journal line of `username`, page order
    pub(super) async fn fetch_journal(&self, username: &str) -> Result<Vec<JournalEntry>> {
        let base = self.config.base();
        let (size, first_page) = self
            .fetch_document(&journal_url(base, username), journal_head)
            .await?;

        let urls = remaining_pages(size, JOURNAL_PAGE_SIZE)
            .map(|page| journal_page_url(base, username, page))
            .collect();
        let journal = self
            .paginate(first_page, urls, parser::journal_entries)
            .await?;

        info!(username, declared = size, lines = journal.len(), "loaded journal");
        Ok(journal)
    }
}

/// Copy completion dates from `journal` onto matching `entries`
///
/// Entries are matched by id. When an id appears more than once in the journal, its
/// first occurrence wins. Returns the number of entries that received a date.
pub fn reconcile_done_dates(entries: &mut [Entry], journal: &[JournalEntry]) -> usize {
    let mut dates: HashMap<&str, &str> = HashMap::with_capacity(journal.len());
    for line in journal {
        dates
            .entry(line.id.as_str())
            .or_insert(line.done_date.as_str());
    }

    let mut matched = 0;
    for entry in entries.iter_mut() {
        if let Some(date) = dates.get(entry.id.as_str()) {
            entry.done_date = Some((*date).to_string());
            matched += 1;
        }
    }
    matched
}
