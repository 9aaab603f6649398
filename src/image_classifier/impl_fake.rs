use crate::error::{Error, Result};
use crate::image_classifier::interface::{Classification, ImageClassifier, ImageClassifierLoader};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// Always answers with these classifications.
    Fixed(Vec<Classification>),
    /// Always fails with a model error.
    Fail(String),
    /// Picks random labels, for running the window without a model file.
    Random,
}

pub struct ImageClassifierFake {
    behavior: FakeBehavior,
    delay: Duration,
    calls: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(behavior: FakeBehavior, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            logger: logger.with_namespace("classifier").with_namespace("fake"),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_classifications(&self) -> Result<Vec<Classification>> {
        let objects = [
            "tabby, tabby cat",
            "golden retriever",
            "sports car, sport car",
            "espresso",
            "laptop, laptop computer",
            "daisy",
            "goldfish, Carassius auratus",
            "mountain bike, all-terrain bike, off-roader",
        ];

        let mut rng = rand::rng();
        let index_dist =
            Uniform::new(0, objects.len()).map_err(|e| Error::Model(e.to_string()))?;
        let confidence_dist = Uniform::new(0.0f32, 1.0).map_err(|e| Error::Model(e.to_string()))?;

        let mut remaining = 1.0f32;
        let mut classifications: Vec<Classification> = Vec::new();
        while classifications.len() < 3 {
            let label = objects[index_dist.sample(&mut rng)];
            if classifications.iter().any(|c| c.label == label) {
                continue;
            }
            let confidence = remaining * confidence_dist.sample(&mut rng);
            remaining -= confidence;
            classifications.push(Classification {
                label: label.to_string(),
                confidence,
            });
        }

        classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(classifications)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info(&format!(
            "Classifying {}x{} image",
            image.width(),
            image.height()
        ));

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        match &self.behavior {
            FakeBehavior::Fixed(classifications) => Ok(classifications.clone()),
            FakeBehavior::Fail(message) => Err(Error::Model(message.clone())),
            FakeBehavior::Random => self.random_classifications(),
        }
    }
}

pub struct ImageClassifierLoaderFake {
    classifier: Option<Arc<dyn ImageClassifier + Send + Sync>>,
    delay: Duration,
    loads: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierLoaderFake {
    pub fn new(
        classifier: Arc<dyn ImageClassifier + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            classifier: Some(classifier),
            delay: Duration::ZERO,
            loads: AtomicUsize::new(0),
            logger: logger.with_namespace("loader").with_namespace("fake"),
        }
    }

    /// A loader whose every load fails.
    #[allow(dead_code)]
    pub fn failing(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            classifier: None,
            delay: Duration::ZERO,
            loads: AtomicUsize::new(0),
            logger: logger.with_namespace("loader").with_namespace("fake"),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[allow(dead_code)]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ImageClassifierLoader for ImageClassifierLoaderFake {
    fn load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info("Loading model...");

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        match &self.classifier {
            Some(classifier) => {
                let _ = self.logger.info("Model loaded");
                Ok(classifier.clone())
            }
            None => Err(Error::Model("fake model failed to load".to_string())),
        }
    }
}
