use crate::image_classifier::impl_fake::{
    FakeBehavior, ImageClassifierFake, ImageClassifierLoaderFake,
};
use crate::image_classifier::interface::{Classification, ImageClassifierLoader};
use crate::image_source::blob_store::BlobStore;
use crate::image_source::loader::impl_fake::ImageLoaderFake;
use crate::image_source::preview::PreviewImage;
use crate::image_source::source::{BlobUrl, ImageSource};
use crate::library::logger::impl_fake::LoggerFake;
use crate::model_session::ModelSession;
use crate::view_controller::app::ClassifierApp;
use crate::view_controller::run_effect::RunEffect;
use image::DynamicImage;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub fn cat_and_dog() -> Vec<Classification> {
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

pub fn preview(generation: u64) -> PreviewImage {
    PreviewImage::new(generation, DynamicImage::new_rgb8(4, 4))
}

pub fn blob(id: u64) -> BlobUrl {
    BlobUrl(format!("blob:test/{}", id))
}

pub struct FixtureOptions {
    pub behavior: FakeBehavior,
    pub load_fails: bool,
    pub load_delay: Duration,
    pub classify_delay: Duration,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            behavior: FakeBehavior::Fixed(cat_and_dog()),
            load_fails: false,
            load_delay: Duration::ZERO,
            classify_delay: Duration::ZERO,
        }
    }
}

#[allow(dead_code)]
pub struct Fixture {
    pub logger: LoggerFake,
    pub model_session: Arc<ModelSession>,
    pub blob_store: Arc<BlobStore>,
    pub image_loader: Arc<ImageLoaderFake>,
    pub app: ClassifierApp,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with(FixtureOptions::default())
    }

    pub fn with(options: FixtureOptions) -> Self {
        let logger = LoggerFake::new();

        let classifier = Arc::new(
            ImageClassifierFake::new(options.behavior, Arc::new(logger.clone()))
                .with_delay(options.classify_delay),
        );
        let loader: Arc<dyn ImageClassifierLoader + Send + Sync> = if options.load_fails {
            Arc::new(
                ImageClassifierLoaderFake::failing(Arc::new(logger.clone()))
                    .with_delay(options.load_delay),
            )
        } else {
            Arc::new(
                ImageClassifierLoaderFake::new(classifier, Arc::new(logger.clone()))
                    .with_delay(options.load_delay),
            )
        };

        let model_session = Arc::new(ModelSession::new(loader, Arc::new(logger.clone())));
        let blob_store = Arc::new(BlobStore::new(Arc::new(logger.clone())));
        let image_loader = Arc::new(ImageLoaderFake::new());

        let run_effect = RunEffect::new(
            Arc::new(logger.clone()),
            model_session.clone(),
            image_loader.clone(),
            blob_store.clone(),
        );
        let app = ClassifierApp::new(run_effect, blob_store.clone(), Arc::new(logger.clone()));

        Self {
            logger,
            model_session,
            blob_store,
            image_loader,
            app,
        }
    }

    /// Registers a picked file that the fake loader can decode.
    pub fn pick_file(&self, name: &str) -> BlobUrl {
        let url = self.blob_store.create(format!("/photos/{}", name));
        self.image_loader.insert(
            ImageSource::Blob(url.clone()),
            DynamicImage::new_rgb8(16, 16),
        );
        url
    }

    pub fn wait_until(&mut self, done: impl Fn(&Fixture) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            self.app.poll();
            if done(self) {
                return true;
            }
            if Instant::now() > deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}
