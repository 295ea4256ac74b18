//! Output encodings for saved result sets

mod csv;
mod json;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::types::Serializable;

/// Encodes a result set into bytes
pub trait Formatter: Send + Sync {
    /// Encode `data`
    fn format(&self, data: &dyn Serializable) -> Result<Vec<u8>>;

    /// File extension, dot included
    fn ext(&self) -> &'static str;
}

/// Formatter for an output format
pub fn formatter(format: OutputFormat, pretty: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new(pretty)),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
