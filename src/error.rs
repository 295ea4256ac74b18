//! Error types for sc-backup
//!
//! Every failure aborts the whole run and bubbles up to the caller unchanged in kind:
//! - Input validation (unknown user, bad list URL, list without a title)
//! - Transport (network failure, HTTP status above 400), always carrying the URL
//! - Parse (expected document structure is missing or malformed)
//! - Consistency (a list does not hold as many entries as it declares)
//! - Internal (a pool task panicked or a worker died)
//!
//! The library never logs errors itself. The binary formats them and maps them to an
//! exit code through [`Error::exit_code`].

use thiserror::Error;

/// Result type alias for sc-backup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sc-backup
#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied something unusable (empty username, malformed list URL)
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What is wrong with the input
        message: String,
    },

    /// The profile page redirected, meaning the user is unknown or private
    #[error("username {username} does not exist or has a limited profile")]
    UserNotFound {
        /// The username that was looked up
        username: String,
    },

    /// The first page of a list has no title
    #[error("{url}: list title cannot be empty")]
    EmptyListTitle {
        /// URL of the list
        url: String,
    },

    /// The request could not be sent or its body could not be read (includes timeouts)
    #[error("failed to GET {url}: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status code above 400
    #[error("http {status} for url {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// URL that produced the status
        url: String,
    },

    /// A fetched document does not have the expected structure
    #[error("{url}: {source}")]
    Parse {
        /// URL of the document
        url: String,
        /// What was wrong with the document
        #[source]
        source: ParseError,
    },

    /// Merged entry count disagrees with the count declared by the list
    #[error("list \"{title}\" declares {declared} entries but {found} were retrieved")]
    CountMismatch {
        /// Title of the list
        title: String,
        /// Count displayed by the source
        declared: usize,
        /// Count actually merged across all pages
        found: usize,
    },

    /// A pool task panicked; the panic was captured as this error
    #[error("critical: page task panicked: {0}. Please open a bug report at https://github.com/mlcdf/sc-backup")]
    TaskPanicked(String),

    /// A pool worker stopped before reporting the tasks it ran
    #[error("critical: pool worker failed: {0}. Please open a bug report at https://github.com/mlcdf/sc-backup")]
    WorkerFailed(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "concurrency")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Structural problems found while reading a document
#[derive(Debug, Error)]
pub enum ParseError {
    /// A CSS selector failed to compile
    #[error("invalid selector {selector}: {reason}")]
    InvalidSelector {
        /// The selector text
        selector: String,
        /// Why it was rejected
        reason: String,
    },

    /// The entry counter is absent and the page is not marked empty
    #[error("failed to parse the number of entries")]
    MissingSize,

    /// A numeric field does not hold a number
    #[error("invalid {field} {value:?}")]
    InvalidNumber {
        /// Which field was being read (e.g., "year", "rating")
        field: &'static str,
        /// The raw text found in the document
        value: String,
    },
}

impl Error {
    /// Machine-readable error category
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidInput { .. } | Error::UserNotFound { .. } | Error::EmptyListTitle { .. } => {
                "input_validation"
            }
            Error::Transport { .. } | Error::HttpStatus { .. } => "transport",
            Error::Parse { .. } => "parse",
            Error::CountMismatch { .. } => "consistency",
            Error::TaskPanicked(_) | Error::WorkerFailed(_) => "internal",
            Error::Config { .. } => "config",
            Error::Io(_) => "io",
            Error::Serialization(_) | Error::Csv(_) => "serialization",
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self.error_code() {
            "input_validation" | "config" => 2,
            "transport" => 3,
            "parse" => 4,
            "consistency" => 5,
            "io" | "serialization" => 6,
            _ => 70,
        }
    }

    pub(crate) fn parse(url: &str, source: ParseError) -> Self {
        Error::Parse {
            url: url.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_error_variants() -> Vec<(Error, &'static str, u8)> {
        vec![
            (
                Error::InvalidInput {
                    message: "username cannot be empty".into(),
                },
                "input_validation",
                2,
            ),
            (
                Error::UserNotFound {
                    username: "ghost".into(),
                },
                "input_validation",
                2,
            ),
            (
                Error::EmptyListTitle {
                    url: "https://example.com/liste/x/1".into(),
                },
                "input_validation",
                2,
            ),
            (
                Error::HttpStatus {
                    status: 503,
                    url: "https://example.com".into(),
                },
                "transport",
                3,
            ),
            (
                Error::parse("https://example.com", ParseError::MissingSize),
                "parse",
                4,
            ),
            (
                Error::CountMismatch {
                    title: "Vu au cinéma".into(),
                    declared: 100,
                    found: 97,
                },
                "consistency",
                5,
            ),
            (Error::TaskPanicked("boom".into()), "internal", 70),
            (Error::WorkerFailed("cancelled".into()), "internal", 70),
            (
                Error::Config {
                    message: "concurrency must be at least 1".into(),
                    key: Some("concurrency".into()),
                },
                "config",
                2,
            ),
            (
                Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
                "io",
                6,
            ),
        ]
    }

    #[test]
    fn every_variant_maps_to_its_category_and_exit_code() {
        for (error, code, exit) in all_error_variants() {
            assert_eq!(error.error_code(), code, "{error}");
            assert_eq!(error.exit_code(), exit, "{error}");
        }
    }

    #[test]
    fn count_mismatch_names_title_and_both_counts() {
        let msg = Error::CountMismatch {
            title: "Vu au cinéma".into(),
            declared: 100,
            found: 97,
        }
        .to_string();

        assert!(msg.contains("Vu au cinéma"));
        assert!(msg.contains("100"));
        assert!(msg.contains("97"));
    }

    #[test]
    fn parse_error_is_wrapped_with_url() {
        let msg = Error::parse(
            "https://example.com/u/collection",
            ParseError::InvalidNumber {
                field: "year",
                value: "(19x9)".into(),
            },
        )
        .to_string();

        assert!(msg.starts_with("https://example.com/u/collection: "));
        assert!(msg.contains("invalid year"));
    }

    #[test]
    fn internal_errors_ask_for_a_bug_report() {
        let msg = Error::TaskPanicked("index out of bounds".into()).to_string();
        assert!(msg.starts_with("critical:"));
        assert!(msg.contains("bug report"));
    }
}
