use crate::error::{Error, Result};
use crate::image_classifier::interface::{Classification, ImageClassifier, ImageClassifierLoader};
use crate::image_classifier::labels::load_labels;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::image_classifier::tract::output::rank_scores;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ImageClassifierTract {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    config: ModelConfig,
}

impl ImageClassifierTract {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let labels = load_labels(&config.labels_path)?;

        let (height, width) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    f32::fact([1, 3, height as usize, width as usize]).into(),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| Error::Model(e.to_string()))?;

        Ok(Self {
            model,
            labels,
            config,
        })
    }
}

impl ImageClassifier for ImageClassifierTract {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>> {
        let (height, width) = self.config.input_shape;
        let input = resize_image_to_tensor(image, width, height);

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| Error::Model(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| Error::Model("model produced no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| Error::Model(e.to_string()))?;

        let scores: Vec<f32> = match output.shape() {
            [1, _] | [_] => output.iter().copied().collect(),
            shape => return Err(Error::OutputShape(shape.to_vec())),
        };

        Ok(rank_scores(&scores, &self.labels, self.config.top_k))
    }
}

pub struct ImageClassifierTractLoader {
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractLoader {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("tract"),
        }
    }
}

impl ImageClassifierLoader for ImageClassifierTractLoader {
    fn load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>> {
        let _ = self
            .logger
            .info(&format!("Loading model {}", self.config.onnx_model_path));

        let classifier = ImageClassifierTract::new(self.config.clone())?;

        let _ = self.logger.info(&format!(
            "Model loaded with {} labels",
            classifier.labels.len()
        ));

        Ok(Arc::new(classifier))
    }
}
