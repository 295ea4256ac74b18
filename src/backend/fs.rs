use super::Backend;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::format::{Formatter, formatter};
use crate::types::Serializable;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes one file per result set into a directory
pub struct FsBackend {
    directory: PathBuf,
    formatter: Box<dyn Formatter>,
}

impl FsBackend {
    /// Create a backend writing `format` files into `directory`
    pub fn new(directory: impl Into<PathBuf>, format: OutputFormat, pretty: bool) -> Self {
        Self {
            directory: directory.into(),
            formatter: formatter(format, pretty),
        }
    }

    /// Target directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path a result set with `slug` is written to
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.directory
            .join(format!("{slug}{}", self.formatter.ext()))
    }
}

#[async_trait]
impl Backend for FsBackend {
    fn location(&self) -> String {
        self.directory.display().to_string()
    }

    async fn create(&self) -> Result<()> {
        debug!(directory = %self.directory.display(), "creating output directory");
        tokio::fs::create_dir_all(&self.directory).await?;
        Ok(())
    }

    async fn save(&self, data: &dyn Serializable) -> Result<()> {
        let path = self.path_for(&data.slug());
        let bytes = self.formatter.format(data)?;

        tokio::fs::write(&path, &bytes).await?;
        info!(
            path = %path.display(),
            entries = data.entries().len(),
            "saved"
        );
        Ok(())
    }
}
