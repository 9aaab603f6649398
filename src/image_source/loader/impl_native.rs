use crate::error::{Error, Result};
use crate::image_source::blob_store::BlobStore;
use crate::image_source::loader::interface::ImageLoader;
use crate::image_source::source::{BlobUrl, ImageSource};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;

pub struct ImageLoaderNative {
    blob_store: Arc<BlobStore>,
    client: reqwest::blocking::Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageLoaderNative {
    pub fn new(blob_store: Arc<BlobStore>, logger: Arc<dyn Logger + Send + Sync>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("image-classifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self {
            blob_store,
            client,
            logger: logger.with_namespace("image_loader"),
        })
    }

    fn read_blob(&self, url: &BlobUrl) -> Result<Vec<u8>> {
        let path = self
            .blob_store
            .resolve(url)
            .ok_or_else(|| Error::RevokedBlob(url.to_string()))?;
        read_file(&path)
    }

    fn read_url(&self, url: &str) -> Result<Vec<u8>> {
        let trimmed = url.trim();

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return self.fetch(trimmed);
        }

        if let Some(path) = trimmed.strip_prefix("file://") {
            return read_file(Path::new(path));
        }

        let path = Path::new(trimmed);
        if path.is_file() {
            return read_file(path);
        }

        Err(Error::UnsupportedUrl(url.to_string()))
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let fetch_error = |source| Error::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?;

        let bytes = response.bytes().map_err(fetch_error)?;
        Ok(bytes.to_vec())
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ImageLoader for ImageLoaderNative {
    fn load(&self, source: &ImageSource) -> Result<DynamicImage> {
        let _ = self.logger.info(&format!("Loading image {}", source));

        let bytes = match source {
            ImageSource::Blob(url) => self.read_blob(url)?,
            ImageSource::Url(url) => self.read_url(url)?,
        };

        let image = image::load_from_memory(&bytes)?;

        let _ = self.logger.info(&format!(
            "Loaded {}x{} image from {}",
            image.width(),
            image.height(),
            source
        ));

        Ok(image)
    }
}
