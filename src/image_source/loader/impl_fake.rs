use crate::error::{Error, Result};
use crate::image_source::loader::interface::ImageLoader;
use crate::image_source::source::ImageSource;
use image::DynamicImage;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves images from memory; unknown sources fail as unsupported.
#[derive(Default)]
pub struct ImageLoaderFake {
    images: Mutex<HashMap<ImageSource, DynamicImage>>,
}

impl ImageLoaderFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, source: ImageSource, image: DynamicImage) {
        if let Ok(mut images) = self.images.lock() {
            images.insert(source, image);
        }
    }
}

impl ImageLoader for ImageLoaderFake {
    fn load(&self, source: &ImageSource) -> Result<DynamicImage> {
        self.images
            .lock()
            .ok()
            .and_then(|images| images.get(source).cloned())
            .ok_or_else(|| Error::UnsupportedUrl(source.to_string()))
    }
}
