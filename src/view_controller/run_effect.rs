use crate::image_source::blob_store::BlobStore;
use crate::image_source::loader::interface::ImageLoader;
use crate::image_source::preview::PreviewImage;
use crate::library::logger::interface::Logger;
use crate::model_session::ModelSession;
use crate::view_controller::core::{Effect, Event};
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    model_session: Arc<ModelSession>,
    image_loader: Arc<dyn ImageLoader + Send + Sync>,
    blob_store: Arc<BlobStore>,
    notify: Arc<dyn Fn() + Send + Sync>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        model_session: Arc<ModelSession>,
        image_loader: Arc<dyn ImageLoader + Send + Sync>,
        blob_store: Arc<BlobStore>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("effect"),
            model_session,
            image_loader,
            blob_store,
            notify: Arc::new(|| {}),
        }
    }

    /// Called after every event sent back, e.g. to wake up the UI.
    pub fn with_notify(mut self, notify: Arc<dyn Fn() + Send + Sync>) -> Self {
        self.notify = notify;
        self
    }

    pub fn run_effect(&self, effect: Effect, event_sender: Sender<Event>) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        let event = match effect {
            Effect::LoadModel => Some(Event::ModelLoadDone(self.model_session.initialize())),
            Effect::LoadPreview { generation, source } => Some(Event::PreviewLoadDone {
                generation,
                result: self
                    .image_loader
                    .load(&source)
                    .map(|image| PreviewImage::new(generation, image)),
            }),
            Effect::Classify { generation, image } => Some(Event::ClassifyDone {
                generation,
                results: self.model_session.classify(image.as_ref()),
            }),
            Effect::RevokeBlob(url) => {
                self.blob_store.revoke(&url);
                None
            }
        };

        if let Some(event) = event {
            if event_sender.send(event).is_err() {
                let _ = self.logger.error("Event channel closed");
                return;
            }
            (self.notify)();
        }
    }
}
