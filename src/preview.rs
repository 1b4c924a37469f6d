//! Session-scoped preview references
//!
//! A [`PreviewUrl`] is a transient handle to an in-memory binary, usable as an
//! image source or a download target while the owning registry lives.

use crate::constants::PREVIEW_URL_PREFIX;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewUrl(String);

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    bytes: Arc<[u8]>,
    mime: &'static str,
}

#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next_id: AtomicU64,
    entries: Mutex<HashMap<PreviewUrl, Entry>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PreviewUrl, Entry>> {
        // Entries stay consistent even if a holder panicked mid-insert
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Allocates a new reference for `bytes`.
    pub fn create_object_url(&self, bytes: Arc<[u8]>, mime: &'static str) -> PreviewUrl {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = PreviewUrl(format!("{}{}", PREVIEW_URL_PREFIX, id));
        self.entries().insert(url.clone(), Entry { bytes, mime });
        url
    }

    /// Looks up the bytes and MIME type behind a live reference.
    pub fn resolve(&self, url: &PreviewUrl) -> Option<(Arc<[u8]>, &'static str)> {
        self.entries()
            .get(url)
            .map(|e| (Arc::clone(&e.bytes), e.mime))
    }

    /// Releases a reference. Returns `false` if it was already gone.
    pub fn revoke(&self, url: &PreviewUrl) -> bool {
        self.entries().remove(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
