use crate::image_source::source::BlobUrl;
use crate::library::logger::interface::Logger;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

const BLOB_PREFIX: &str = "blob:image-classifier/";

/// Hands out short-lived references to files the user picked, so the rest
/// of the app deals in opaque ids instead of paths. A reference stops
/// resolving once revoked.
pub struct BlobStore {
    next_id: AtomicU64,
    blobs: Mutex<HashMap<BlobUrl, PathBuf>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl BlobStore {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            blobs: Mutex::new(HashMap::new()),
            logger: logger.with_namespace("blob_store"),
        }
    }

    pub fn create(&self, path: impl AsRef<Path>) -> BlobUrl {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let url = BlobUrl(format!("{}{}", BLOB_PREFIX, id));
        let path = path.as_ref().to_path_buf();

        let _ = self
            .logger
            .info(&format!("Created {} for {}", url, path.display()));

        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.insert(url.clone(), path);
        }

        url
    }

    pub fn resolve(&self, url: &BlobUrl) -> Option<PathBuf> {
        self.blobs
            .lock()
            .ok()
            .and_then(|blobs| blobs.get(url).cloned())
    }

    pub fn revoke(&self, url: &BlobUrl) {
        let removed = self
            .blobs
            .lock()
            .ok()
            .and_then(|mut blobs| blobs.remove(url));

        if removed.is_some() {
            let _ = self.logger.info(&format!("Revoked {}", url));
        }
    }

    pub fn revoke_all(&self) {
        if let Ok(mut blobs) = self.blobs.lock() {
            let count = blobs.len();
            blobs.clear();
            if count > 0 {
                let _ = self.logger.info(&format!("Revoked {} blob(s)", count));
            }
        }
    }

    #[allow(dead_code)]
    pub fn live_count(&self) -> usize {
        self.blobs.lock().map(|blobs| blobs.len()).unwrap_or(0)
    }
}
