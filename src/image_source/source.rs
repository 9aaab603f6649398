use std::fmt;

/// Identifier of a local file registered in the [`BlobStore`].
///
/// [`BlobStore`]: crate::image_source::blob_store::BlobStore
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobUrl(pub(crate) String);

impl BlobUrl {
    #[allow(dead_code)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    Blob(BlobUrl),
    /// Exactly what the user typed, possibly empty or invalid.
    Url(String),
}

impl ImageSource {
    /// An empty URL is a selected source that nothing can be drawn for.
    pub fn is_renderable(&self) -> bool {
        match self {
            ImageSource::Blob(_) => true,
            ImageSource::Url(url) => !url.is_empty(),
        }
    }

    pub fn blob(&self) -> Option<&BlobUrl> {
        match self {
            ImageSource::Blob(blob) => Some(blob),
            ImageSource::Url(_) => None,
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Blob(blob) => write!(f, "{}", blob),
            ImageSource::Url(url) => write!(f, "{:?}", url),
        }
    }
}
