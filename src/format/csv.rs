use super::Formatter;
use crate::error::{Error, Result};
use crate::types::Serializable;

const HEADER: [&str; 9] = [
    "id",
    "title",
    "original_title",
    "year",
    "authors",
    "rating",
    "done_date",
    "comment",
    "favorite",
];

/// CSV table with one row per entry; authors are joined with `;`
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, data: &dyn Serializable) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;

        for entry in data.entries() {
            writer.write_record([
                entry.id.clone(),
                entry.title.clone(),
                entry.original_title.clone().unwrap_or_default(),
                entry.year.map(|y| y.to_string()).unwrap_or_default(),
                entry.authors.join(";"),
                entry.rating.map(|r| r.to_string()).unwrap_or_default(),
                entry.done_date.clone().unwrap_or_default(),
                entry.comment.clone().unwrap_or_default(),
                entry.favorite.to_string(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }

    fn ext(&self) -> &'static str {
        ".csv"
    }
}
