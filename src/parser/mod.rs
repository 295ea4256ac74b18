//! HTML extraction
//!
//! Pure functions from a parsed [`Document`] to entries, journal lines and the
//! counters used for pagination. Nothing here performs I/O.
//!
//! Entries come in two markups: collection pages render `.elco-collection-item`
//! elements, list pages render `.elli-item` elements. Both share the title, date and
//! author markup, but the rating, comment and favorite flag live in different places.


use crate::error::ParseError;
use crate::types::{Entry, Filter, JournalEntry};
use scraper::{ElementRef, Html, Selector};

const ITEM: &str = ".elco-collection-item, .elli-item";
const LIST_ITEM_CLASS: &str = "elli-item";
const PRODUCT_ID: &str = ".elco-collection-content > .elco-collection-poster, .elli-media figure";
const TITLE: &str = ".elco-title a";
const ORIGINAL_TITLE: &str = ".elco-original-title";
const DATE: &str = ".elco-date";
const AUTHORS: &str = ".elco-product-detail a.elco-baseline-a, .elli-content a.elco-baseline-a";
const COLLECTION_RATING: &str = ".elco-collection-rating.user > a > div > span";
const LIST_RATING: &str = ".elli-annotation-rating span";
const LIST_COMMENT: &str = ".elli-annotation-content";
const FAVORITE: &str = ".elli-favorite, .elco-collection-favorite";

const EMPTY_COLLECTION: &str = ".elco-collection-item-empty";
const LIST_SIZE: &str = "[data-rel=list-products-count]";
const LIST_TITLE: &str = ".d-heading1.elme-listTitle";
const LIST_DESCRIPTION: &str = ".elme-listDescription";

const JOURNAL_ROW: &str = ".eldi-list-item";
const JOURNAL_ITEM: &str = ".eldi-collection-container";
const JOURNAL_POSTER: &str = ".eldi-collection-poster";
const JOURNAL_COUNT: &str = ".elco-collection-count";

const PRODUCT_ID_ATTR: &str = "data-sc-product-id";
const DONE_DATE_ATTR: &str = "data-sc-datedone";

/// Parses one page into records of type `T`
pub type PageParser<T> = fn(&Document) -> Result<Vec<T>, ParseError>;

/// A parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a page body
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match under `element`, `None` when absent or blank
fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(text)
        .filter(|t| !t.is_empty())
}

/// Parse a counter such as `(42)` or `1 204`
fn number<N: std::str::FromStr>(field: &'static str, raw: &str) -> Result<N, ParseError> {
    let digits: String = raw
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    digits.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Every entry on a collection or list page, in document order
pub fn entries(document: &Document) -> Result<Vec<Entry>, ParseError> {
    let item = selector(ITEM)?;
    let product_id = selector(PRODUCT_ID)?;
    let title = selector(TITLE)?;
    let original_title = selector(ORIGINAL_TITLE)?;
    let date = selector(DATE)?;
    let authors = selector(AUTHORS)?;
    let collection_rating = selector(COLLECTION_RATING)?;
    let list_rating = selector(LIST_RATING)?;
    let list_comment = selector(LIST_COMMENT)?;
    let favorite = selector(FAVORITE)?;

    let mut parsed = Vec::new();
    for element in document.html.select(&item) {
        let list_shaped = element.value().classes().any(|c| c == LIST_ITEM_CLASS);

        let id = element
            .select(&product_id)
            .next()
            .and_then(|e| e.value().attr(PRODUCT_ID_ATTR))
            .map(|id| id.trim().to_string())
            .unwrap_or_default();

        // some works have no year at all
        let year = first_text(element, &date)
            .map(|raw| number("year", &raw))
            .transpose()?;

        let rating_selector = if list_shaped {
            &list_rating
        } else {
            &collection_rating
        };
        let rating = first_text(element, rating_selector)
            .map(|raw| number("rating", &raw))
            .transpose()?;

        let comment = if list_shaped {
            first_text(element, &list_comment)
        } else {
            None
        };

        parsed.push(Entry {
            id,
            title: first_text(element, &title).unwrap_or_default(),
            original_title: first_text(element, &original_title),
            year,
            authors: element
                .select(&authors)
                .map(text)
                .filter(|a| !a.is_empty())
                .collect(),
            rating,
            done_date: None,
            comment,
            favorite: element.select(&favorite).next().is_some(),
        });
    }

    Ok(parsed)
}

/// Declared number of entries of a collection page for `filter`
///
/// A page without a counter is only valid when it is explicitly marked empty.
pub fn collection_size(document: &Document, filter: Filter) -> Result<usize, ParseError> {
    let counter = selector(&format!("[data-sc-collection-filter={filter}] span span"))?;

    let raw: String = document.html.select(&counter).map(text).collect();
    if raw.is_empty() {
        let empty = selector(EMPTY_COLLECTION)?;
        if document.html.select(&empty).next().is_some() {
            return Ok(0);
        }
        return Err(ParseError::MissingSize);
    }

    number("collection size", &raw)
}

/// Declared number of entries of a list (0 when the counter is absent)
pub fn list_size(document: &Document) -> Result<usize, ParseError> {
    let counter = selector(LIST_SIZE)?;

    match document.html.select(&counter).next().map(text) {
        Some(raw) if !raw.is_empty() => number("list size", &raw),
        _ => Ok(0),
    }
}

/// Title of a list, `None` when missing or blank
pub fn list_title(document: &Document) -> Result<Option<String>, ParseError> {
    let title = selector(LIST_TITLE)?;
    Ok(document
        .html
        .select(&title)
        .next()
        .map(text)
        .filter(|t| !t.is_empty()))
}

/// Description of a list, if it has one
pub fn list_description(document: &Document) -> Result<Option<String>, ParseError> {
    let description = selector(LIST_DESCRIPTION)?;
    Ok(document
        .html
        .select(&description)
        .next()
        .map(text)
        .filter(|t| !t.is_empty()))
}

/// Total number of journal entries, summed over every category counter
pub fn journal_size(document: &Document) -> Result<usize, ParseError> {
    let counter = selector(JOURNAL_COUNT)?;

    let mut size = 0;
    for raw in document.html.select(&counter).map(text) {
        if !raw.is_empty() {
            size += number::<usize>("journal size", &raw)?;
        }
    }
    Ok(size)
}

/// Completion dates listed on a journal page
///
/// Rows without a date are month or year headings, and items without a product id are
/// series episodes; both are skipped.
pub fn journal_entries(document: &Document) -> Result<Vec<JournalEntry>, ParseError> {
    let row = selector(JOURNAL_ROW)?;
    let item = selector(JOURNAL_ITEM)?;
    let poster = selector(JOURNAL_POSTER)?;

    let mut parsed = Vec::new();
    for row in document.html.select(&row) {
        let Some(date) = row.value().attr(DONE_DATE_ATTR) else {
            continue;
        };

        for container in row.select(&item) {
            let Some(id) = container
                .select(&poster)
                .next()
                .and_then(|p| p.value().attr(PRODUCT_ID_ATTR))
            else {
                continue;
            };

            parsed.push(JournalEntry {
                id: id.trim().to_string(),
                done_date: date.trim().to_string(),
            });
        }
    }

    Ok(parsed)
}
