use crate::error::Result;
use crate::image_source::source::ImageSource;
use image::DynamicImage;

/// Realizes an [`ImageSource`] into decoded pixels for preview and
/// classification.
pub trait ImageLoader {
    fn load(&self, source: &ImageSource) -> Result<DynamicImage>;
}
