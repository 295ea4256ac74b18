//! Core types for sc-backup

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One catalog item: a film, a series, a book, an album...
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Product identifier assigned by the source
    pub id: String,

    /// Displayed title
    pub title: String,

    /// Original or alternate title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,

    /// Release year, when the source knows it (negative for works before the common era)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Directors, authors, artists...
    #[serde(default)]
    pub authors: Vec<String>,

    /// The user's rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    /// When the user marked the item as done (filled from the journal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_date: Option<String>,

    /// The user's comment on a list item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Whether the item is flagged as a favorite
    #[serde(default)]
    pub favorite: bool,
}

/// A journal line: the date a product was marked as done
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Product identifier
    pub id: String,
    /// Completion date as published by the source
    pub done_date: String,
}

/// Collection category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Movies
    Films,
    /// TV series
    Series,
    /// Comics
    Bd,
    /// Books
    Livres,
    /// Music albums
    Albums,
    /// Music tracks
    Morceaux,
}

impl Category {
    /// Every category, in backup order
    pub const ALL: [Category; 6] = [
        Category::Films,
        Category::Series,
        Category::Bd,
        Category::Livres,
        Category::Albums,
        Category::Morceaux,
    ];

    /// Path segment used by the source
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Films => "films",
            Category::Series => "series",
            Category::Bd => "bd",
            Category::Livres => "livres",
            Category::Albums => "albums",
            Category::Morceaux => "morceaux",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::Config {
                message: format!("unknown category {s}"),
                key: Some("categories".to_string()),
            })
    }
}

/// Collection status filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Items the user has seen, read or listened to
    Done,
    /// Items on the user's wish list
    Wish,
}

impl Filter {
    /// Every filter, in backup order
    pub const ALL: [Filter; 2] = [Filter::Done, Filter::Wish];

    /// Path segment used by the source
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::Done => "done",
            Filter::Wish => "wish",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::Config {
                message: format!("unknown filter {s}"),
                key: Some("filters".to_string()),
            })
    }
}

/// A named result set a backend knows how to store
///
/// Implementors expose a storage name plus the two views the formatters need: the flat
/// entry rows (CSV) and a structured document (JSON).
pub trait Serializable: Send + Sync {
    /// Storage name, without extension
    fn slug(&self) -> String;

    /// Flat view used for tabular output
    fn entries(&self) -> &[Entry];

    /// Structured view used for document output
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

/// Every entry of one category for one filter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Entries, page order then document order
    pub entries: Vec<Entry>,
    /// Category of the entries
    pub category: Category,
    /// Status filter of the entries
    pub filter: Filter,
    /// Owner of the collection
    pub username: String,
}

impl Collection {
    /// Create a collection
    pub fn new(
        username: impl Into<String>,
        category: Category,
        filter: Filter,
        entries: Vec<Entry>,
    ) -> Self {
        Self {
            entries,
            category,
            filter,
            username: username.into(),
        }
    }
}

impl Serializable for Collection {
    fn slug(&self) -> String {
        format!("{}-{}", self.category, self.filter)
    }

    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Storage name of a list whose title has no letter or digit
const FALLBACK_LIST_SLUG: &str = "list";

/// A user-curated list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Entries, in the order chosen by the list author
    pub entries: Vec<Entry>,
    /// Title of the list
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl List {
    /// Create a list
    pub fn new(title: impl Into<String>, description: Option<String>, entries: Vec<Entry>) -> Self {
        Self {
            entries,
            title: title.into(),
            description,
        }
    }
}

impl Serializable for List {
    fn slug(&self) -> String {
        match slug::slugify(&self.title) {
            name if name.is_empty() => FALLBACK_LIST_SLUG.to_string(),
            name => name,
        }
    }

    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
