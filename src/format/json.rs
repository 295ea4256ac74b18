use super::Formatter;
use crate::error::Result;
use crate::types::Serializable;
use serde::Serialize;

/// JSON documents, compact or indented with four spaces
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Create a formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, data: &dyn Serializable) -> Result<Vec<u8>> {
        let value = data.to_json()?;

        if !self.pretty {
            return Ok(serde_json::to_vec(&value)?);
        }

        let mut out = Vec::new();
        let indent = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, indent);
        value.serialize(&mut serializer)?;
        Ok(out)
    }

    fn ext(&self) -> &'static str {
        ".json"
    }
}
