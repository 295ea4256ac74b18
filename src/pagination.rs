//! Page counting and page URL construction
//!
//! Page 1 is always fetched up front, so the helpers here only describe pages 2 and
//! onwards. Page sizes are fixed by how the site renders each kind of page; a wrong
//! value silently yields missing or empty pages.

use crate::types::{Category, Filter};
use std::ops::RangeInclusive;

/// Entries per collection page
pub const COLLECTION_PAGE_SIZE: usize = 18;

/// Entries per list page
pub const LIST_PAGE_SIZE: usize = 30;

/// Entries per journal page
pub const JOURNAL_PAGE_SIZE: usize = 20;

/// Number of pages needed to show `declared_total` entries
///
/// # Panics
///
/// Panics if `page_size` is zero.
pub fn page_count(declared_total: usize, page_size: usize) -> usize {
    declared_total.div_ceil(page_size)
}

/// Indices of the pages still to fetch after page 1
///
/// Empty when everything fits on one page, otherwise `2..=page_count`.
///
/// ```
/// use sc_backup::pagination::remaining_pages;
///
/// assert_eq!(remaining_pages(18, 18).count(), 0);
/// assert_eq!(remaining_pages(19, 18).collect::<Vec<_>>(), vec![2]);
/// assert_eq!(remaining_pages(100, 30).collect::<Vec<_>>(), vec![2, 3, 4]);
/// ```
pub fn remaining_pages(declared_total: usize, page_size: usize) -> RangeInclusive<usize> {
    2..=page_count(declared_total, page_size)
}

/// URL of page `index` of a list
///
/// An existing `page-<n>` suffix (path segment or fragment) is replaced, anything after
/// it included. Otherwise a `page-<n>` path segment is appended.
///
/// ```
/// use sc_backup::pagination::list_page_url;
///
/// let url = "https://www.senscritique.com/liste/Vu_au_cinema/363578";
/// assert_eq!(list_page_url(url, 3), format!("{url}/page-3"));
/// assert_eq!(list_page_url(&format!("{url}#page-1/"), 3), format!("{url}#page-3"));
/// ```
pub fn list_page_url(url: &str, index: usize) -> String {
    if let Some(pos) = url.find("page-") {
        return format!("{}page-{index}", &url[..pos]);
    }
    if url.ends_with('/') {
        format!("{url}page-{index}")
    } else {
        format!("{url}/page-{index}")
    }
}

/// Collection URL without its page number
///
/// Page `n` is this prefix followed by `n`; the prefix alone is the first page.
pub fn collection_url(base: &str, username: &str, category: Category, filter: Filter) -> String {
    format!("{base}/{username}/collection/{filter}/{category}/all/all/all/all/all/all/all/page-")
}

/// URL of page `index` of a collection
pub fn collection_page_url(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}")
}

/// Profile page, used to check that a user exists
pub fn profile_url(base: &str, username: &str) -> String {
    format!("{base}/{username}")
}

/// First page of a user's journal
pub fn journal_url(base: &str, username: &str) -> String {
    format!("{base}/{username}/journal/all/all")
}

/// Page `index` of a user's journal, served as an HTML fragment
pub fn journal_page_url(base: &str, username: &str, index: usize) -> String {
    format!("{base}/{username}/journal/all/all/all/page-{index}.ajax")
}
