use crate::error::Result;
use image::DynamicImage;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

pub trait ImageClassifier {
    /// Returns labels ordered by descending confidence.
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>>;
}

/// Acquires a ready-to-use classifier. Loading may be slow (model files,
/// graph optimization) and is expected to run off the UI thread.
pub trait ImageClassifierLoader {
    fn load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>>;
}
