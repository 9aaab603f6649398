/// Where the classifier finds its model and labels.
///
/// Neither file ships with the crate. The defaults expect the ONNX model zoo
/// MobileNetV2 (`mobilenetv2-7.onnx`) and a 1000-line ImageNet labels file
/// under `./models/`, overridable with `IMAGE_CLASSIFIER_MODEL` and
/// `IMAGE_CLASSIFIER_LABELS`. Set `IMAGE_CLASSIFIER_FAKE=1` to run without
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    pub labels_path: String,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub top_k: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: "./models/mobilenetv2-7.onnx".to_string(),
            labels_path: "./models/imagenet_labels.txt".to_string(),
            input_shape: (224, 224),
            top_k: 3,
        }
    }
}
