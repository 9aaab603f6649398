use crate::image_classifier::models::model_config::ModelConfig;
use chrono::Offset;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    /// MobileNet ONNX model run with tract.
    Tract,
    /// Random labels, no model file needed.
    Fake,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub logger_timezone: chrono::FixedOffset,
    pub classifier: ClassifierKind,
    pub model: ModelConfig,
    pub fake_load_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Image Classifier".to_string(),
            window_size: [720.0, 640.0],
            logger_timezone: local_timezone(),
            classifier: ClassifierKind::Tract,
            model: ModelConfig::default(),
            fake_load_delay: Duration::from_secs(1),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = var("IMAGE_CLASSIFIER_MODEL") {
            self.model.onnx_model_path = path;
        }
        if let Some(path) = var("IMAGE_CLASSIFIER_LABELS") {
            self.model.labels_path = path;
        }
        if let Some(top_k) = var("IMAGE_CLASSIFIER_TOP_K").and_then(|v| v.trim().parse().ok()) {
            self.model.top_k = top_k;
        }
        if let Some(fake) = var("IMAGE_CLASSIFIER_FAKE") {
            if matches!(fake.trim(), "1" | "true" | "yes") {
                self.classifier = ClassifierKind::Fake;
            }
        }
        self
    }
}

fn local_timezone() -> chrono::FixedOffset {
    chrono::Local::now().offset().fix()
}
