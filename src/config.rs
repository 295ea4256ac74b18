//! Configuration types for sc-backup

use crate::error::{Error, Result};
use crate::types::{Category, Filter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Settings for a backup run
///
/// Passed explicitly to [`Backup`](crate::Backup) instead of living in process-wide
/// globals. Every field has a default matching the public site.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Root of the site (default: "https://www.senscritique.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for each HTTP request (default: 20 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// Number of pages fetched concurrently within one pagination phase (default: 20)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Categories backed up by a collection run (default: all of them)
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,

    /// Filters backed up for each category (default: done and wish)
    #[serde(default = "default_filters")]
    pub filters: Vec<Filter>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            concurrency: default_concurrency(),
            categories: default_categories(),
            filters: default_filters(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load settings from a JSON file; missing fields take their default
    ///
    /// The loaded configuration is validated before being returned.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {e}", path.display()),
            key: None,
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| Error::Config {
            message: format!("invalid config file {}: {e}", path.display()),
            key: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config {
                message: "base_url cannot be empty".to_string(),
                key: Some("base_url".to_string()),
            });
        }
        url::Url::parse(&self.base_url).map_err(|e| Error::Config {
            message: format!("invalid base_url {}: {e}", self.base_url),
            key: Some("base_url".to_string()),
        })?;
        if self.concurrency == 0 {
            return Err(Error::Config {
                message: "concurrency must be at least 1".to_string(),
                key: Some("concurrency".to_string()),
            });
        }
        if self.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
                key: Some("timeout".to_string()),
            });
        }
        Ok(())
    }

    /// Base URL without its trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// On-disk encoding of saved result sets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON document per result set
    #[default]
    Json,
    /// One CSV table per result set
    Csv,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(Error::Config {
                message: format!("invalid format {other}: it should be either 'json' or 'csv'"),
                key: Some("format".to_string()),
            }),
        }
    }
}

/// Where and how the filesystem backend writes
#[derive(Clone, Debug)]
pub struct OutputConfig {
    /// Output directory (default: "./output")
    pub directory: PathBuf,

    /// Encoding of the saved files
    pub format: OutputFormat,

    /// Indent JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            format: OutputFormat::default(),
            pretty: false,
        }
    }
}

fn default_base_url() -> String {
    "https://www.senscritique.com".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_concurrency() -> usize {
    20
}

fn default_categories() -> Vec<Category> {
    Category::ALL.to_vec()
}

fn default_filters() -> Vec<Filter> {
    Filter::ALL.to_vec()
}

fn default_user_agent() -> String {
    format!("sc-backup/{}", env!("CARGO_PKG_VERSION"))
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_public_site() {
        let config = Config::default();

        assert_eq!(config.base_url, "https://www.senscritique.com");
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.concurrency, 20);
        assert_eq!(config.categories.len(), 6);
        assert_eq!(config.filters, vec![Filter::Done, Filter::Wish]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_object_yields_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty config must deserialize");

        assert_eq!(config.concurrency, 20);
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.categories, Category::ALL.to_vec());
    }

    #[test]
    fn config_survives_json_round_trip() {
        let original = Config {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout: Duration::from_secs(5),
            concurrency: 3,
            categories: vec![Category::Livres],
            filters: vec![Filter::Wish],
            user_agent: "test".to_string(),
        };

        let json = serde_json::to_string(&original).expect("Config must serialize");
        let restored: Config = serde_json::from_str(&json).expect("Config must deserialize");

        assert_eq!(restored.base_url, original.base_url);
        assert_eq!(restored.timeout, original.timeout);
        assert_eq!(restored.concurrency, original.concurrency);
        assert_eq!(restored.categories, original.categories);
        assert_eq!(restored.filters, original.filters);
    }

    #[test]
    fn from_file_reads_partial_json() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let path = temp.path().join("sc-backup.json");
        std::fs::write(
            &path,
            r#"{"timeout": 7, "concurrency": 2, "categories": ["bd"], "filters": ["wish"]}"#,
        )
        .expect("write config");

        let config = Config::from_file(&path).expect("config file loads");

        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.categories, vec![Category::Bd]);
        assert_eq!(config.filters, vec![Filter::Wish]);
        assert_eq!(config.base_url, "https://www.senscritique.com");
    }

    #[test]
    fn from_file_rejects_missing_malformed_and_invalid_files() {
        let temp = tempfile::TempDir::new().expect("tempdir");

        let missing = Config::from_file(&temp.path().join("nope.json"));
        assert!(matches!(missing, Err(Error::Config { .. })));

        let malformed = temp.path().join("malformed.json");
        std::fs::write(&malformed, "{ concurrency: ").expect("write config");
        assert!(matches!(Config::from_file(&malformed), Err(Error::Config { .. })));

        let invalid = temp.path().join("invalid.json");
        std::fs::write(&invalid, r#"{"concurrency": 0}"#).expect("write config");
        match Config::from_file(&invalid) {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("concurrency")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let config = Config {
            concurrency: 0,
            ..Default::default()
        };

        match config.validate() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("concurrency")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_and_bad_base_url_are_rejected() {
        let config = Config {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_strips_trailing_slash() {
        let config = Config {
            base_url: "http://localhost:1234/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base(), "http://localhost:1234");
    }

    #[test]
    fn output_format_parses_json_and_csv_only() {
        assert_eq!("json".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));

        let err = "xml".parse::<OutputFormat>().expect_err("xml is not supported");
        assert!(err.to_string().contains("either 'json' or 'csv'"));
    }
}
