//! Assertions over saved result sets

use sc_backup::MemoryBackend;

/// Ids saved under `slug`, in saved order
pub fn saved_ids(backend: &MemoryBackend, slug: &str) -> Vec<String> {
    backend
        .get(slug)
        .unwrap_or_else(|| panic!("nothing saved under {slug}, saved: {:?}", backend.slugs()))
        .entries
        .into_iter()
        .map(|e| e.id)
        .collect()
}
