use crate::error::{Error, Result};
use crate::image_classifier::interface::{Classification, ImageClassifier, ImageClassifierLoader};
use crate::image_source::preview::PreviewImage;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Owns the classifier for the lifetime of the window: acquired once,
/// never reloaded.
pub struct ModelSession {
    loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
    handle: OnceLock<Arc<dyn ImageClassifier + Send + Sync>>,
    started: AtomicBool,
    loading: AtomicBool,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ModelSession {
    pub fn new(
        loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            loader,
            handle: OnceLock::new(),
            started: AtomicBool::new(false),
            loading: AtomicBool::new(false),
            logger: logger.with_namespace("model_session"),
        }
    }

    /// Acquires the classifier. Only the first call loads; later calls
    /// report whether a classifier is available without loading again.
    pub fn initialize(&self) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            let _ = self.logger.info("Model already initialized");
            return if self.is_ready() {
                Ok(())
            } else {
                Err(Error::ModelUnavailable)
            };
        }

        self.loading.store(true, Ordering::SeqCst);
        let _ = self.logger.info("Initializing model...");

        let outcome = match self.loader.load() {
            Ok(handle) => {
                let _ = self.handle.set(handle);
                let _ = self.logger.info("Model ready");
                Ok(())
            }
            Err(e) => {
                let _ = self.logger.error(&format!("Error loading model: {}", e));
                Err(e)
            }
        };

        self.loading.store(false, Ordering::SeqCst);
        outcome
    }

    #[allow(dead_code)]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn is_ready(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Classifies the image currently on display. Returns `None` without
    /// touching anything when the classifier or the image is missing, or
    /// when classification fails; each case is logged.
    pub fn classify(&self, image: Option<&PreviewImage>) -> Option<Vec<Classification>> {
        let (Some(classifier), Some(image)) = (self.handle.get(), image) else {
            let _ = self
                .logger
                .error("Model or image reference is not available.");
            return None;
        };

        let _ = self.logger.info(&format!(
            "Classifying image (generation {})",
            image.generation
        ));

        match classifier.classify(&image.image) {
            Ok(classifications) => {
                let _ = self
                    .logger
                    .info(&format!("Classification results: {:?}", classifications));
                Some(classifications)
            }
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("Error classifying image: {}", e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::impl_fake::{
        FakeBehavior, ImageClassifierFake, ImageClassifierLoaderFake,
    };
    use crate::library::logger::impl_fake::LoggerFake;
    use image::DynamicImage;

    fn cat_and_dog() -> Vec<Classification> {
        vec![
            Classification {
                label: "cat".to_string(),
                confidence: 0.91,
            },
            Classification {
                label: "dog".to_string(),
                confidence: 0.05,
            },
        ]
    }

    fn session(behavior: FakeBehavior) -> (ModelSession, Arc<ImageClassifierLoaderFake>, LoggerFake) {
        let logger = LoggerFake::new();
        let classifier = Arc::new(ImageClassifierFake::new(behavior, Arc::new(logger.clone())));
        let loader = Arc::new(ImageClassifierLoaderFake::new(
            classifier,
            Arc::new(logger.clone()),
        ));
        let session = ModelSession::new(loader.clone(), Arc::new(logger.clone()));
        (session, loader, logger)
    }

    fn preview() -> PreviewImage {
        PreviewImage::new(1, DynamicImage::new_rgb8(8, 8))
    }

    #[test]
    fn test_initialize_acquires_handle() {
        let (session, _, _) = session(FakeBehavior::Fixed(cat_and_dog()));

        assert!(!session.is_ready());
        session.initialize().unwrap();

        assert!(session.is_ready());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_initialize_loads_only_once() {
        let (session, loader, _) = session(FakeBehavior::Fixed(cat_and_dog()));

        session.initialize().unwrap();
        session.initialize().unwrap();

        assert_eq!(loader.loads(), 1);
    }

    #[test]
    fn test_failed_initialize_clears_loading_and_logs() {
        let logger = LoggerFake::new();
        let loader = Arc::new(ImageClassifierLoaderFake::failing(Arc::new(logger.clone())));
        let session = ModelSession::new(loader, Arc::new(logger.clone()));

        assert!(session.initialize().is_err());

        assert!(!session.is_loading());
        assert!(!session.is_ready());
        assert!(logger.contains("Error loading model"));
        assert!(matches!(session.initialize(), Err(Error::ModelUnavailable)));
    }

    #[test]
    fn test_classify_returns_results_unmodified() {
        let (session, _, _) = session(FakeBehavior::Fixed(cat_and_dog()));
        session.initialize().unwrap();

        let results = session.classify(Some(&preview()));

        assert_eq!(results, Some(cat_and_dog()));
    }

    #[test]
    fn test_classify_without_model_is_a_logged_no_op() {
        let (session, _, logger) = session(FakeBehavior::Fixed(cat_and_dog()));

        let results = session.classify(Some(&preview()));

        assert_eq!(results, None);
        assert!(logger.contains("Model or image reference is not available."));
    }

    #[test]
    fn test_classify_without_image_is_a_logged_no_op() {
        let (session, _, logger) = session(FakeBehavior::Fixed(cat_and_dog()));
        session.initialize().unwrap();

        assert_eq!(session.classify(None), None);
        assert!(logger.contains("Model or image reference is not available."));
    }

    #[test]
    fn test_classify_failure_is_logged() {
        let (session, _, logger) = session(FakeBehavior::Fail("bad tensor".to_string()));
        session.initialize().unwrap();

        assert_eq!(session.classify(Some(&preview())), None);
        assert!(logger.contains("Error classifying image: model error: bad tensor"));
    }
}
