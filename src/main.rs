use config::{ClassifierKind, Config};
use image_classifier::impl_fake::{FakeBehavior, ImageClassifierFake, ImageClassifierLoaderFake};
use image_classifier::impl_tract::ImageClassifierTractLoader;
use image_classifier::interface::ImageClassifierLoader;
use image_source::blob_store::BlobStore;
use image_source::loader::impl_native::ImageLoaderNative;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use model_session::ModelSession;
use std::sync::Arc;
use view_controller::app::ClassifierApp;
use view_controller::run_effect::RunEffect;

mod config;
mod error;
mod image_classifier;
mod image_source;
mod library;
mod model_session;
mod view_controller;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let loader: Arc<dyn ImageClassifierLoader + Send + Sync> = match config.classifier {
        ClassifierKind::Tract => Arc::new(ImageClassifierTractLoader::new(
            config.model.clone(),
            logger.clone(),
        )),
        ClassifierKind::Fake => {
            let classifier = Arc::new(ImageClassifierFake::new(FakeBehavior::Random, logger.clone()));
            Arc::new(
                ImageClassifierLoaderFake::new(classifier, logger.clone())
                    .with_delay(config.fake_load_delay),
            )
        }
    };

    let model_session = Arc::new(ModelSession::new(loader, logger.clone()));

    let blob_store = Arc::new(BlobStore::new(logger.clone()));

    let image_loader = Arc::new(ImageLoaderNative::new(blob_store.clone(), logger.clone())?);

    let run_effect = RunEffect::new(
        logger.clone(),
        model_session,
        image_loader,
        blob_store.clone(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(config.window_title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let run_effect = run_effect.with_notify(Arc::new(move || ctx.request_repaint()));
            Box::new(ClassifierApp::new(run_effect, blob_store, logger))
        }),
    )?;

    Ok(())
}
