//! Storage backends
//!
//! The backup engine hands finished result sets to a [`Backend`] and never looks at how
//! they are encoded or where they end up.

mod fs;
mod memory;

pub use fs::FsBackend;
pub use memory::{MemoryBackend, SavedPayload};

use crate::error::Result;
use crate::types::Serializable;
use async_trait::async_trait;

/// Destination for backed-up result sets
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human readable location, used in logs and the final summary
    fn location(&self) -> String;

    /// Prepare the storage location
    ///
    /// Must be idempotent: creating an existing location succeeds.
    async fn create(&self) -> Result<()>;

    /// Store `data` under its slug, replacing any previous payload with the same slug
    async fn save(&self, data: &dyn Serializable) -> Result<()>;
}
