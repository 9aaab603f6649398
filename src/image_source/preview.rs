use image::DynamicImage;
use std::sync::Arc;

/// A decoded image that is currently shown, tagged with the image
/// generation it was loaded for.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    pub generation: u64,
    pub image: Arc<DynamicImage>,
}

impl PreviewImage {
    pub fn new(generation: u64, image: DynamicImage) -> Self {
        Self {
            generation,
            image: Arc::new(image),
        }
    }
}
