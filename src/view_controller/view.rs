use super::core::{Phase, Preview, Readiness, State};
use crate::image_classifier::interface::Classification;
use crate::image_source::preview::PreviewImage;
use std::fmt;

pub const LOADING_MESSAGE: &str = "Initializing Model...";
pub const HEADER: &str = "Image Classifier";
pub const UPLOAD_BUTTON: &str = "Upload Image";
pub const URL_PLACEHOLDER: &str = "Enter Image URL";
pub const CLASSIFY_BUTTON: &str = "Detect Image";
pub const PREVIEW_ALT: &str = "Image Preview";
pub const BEST_GUESS: &str = "Best Guess";

/// Everything the window shows for a given [`State`], without any egui
/// types so it can be checked in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Loading { message: &'static str },
    Form(FormView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub url_input: String,
    pub notice: Option<String>,
    pub preview: Option<PreviewView>,
    pub show_classify_button: bool,
    pub results: Vec<ResultRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewView {
    Loading,
    Image(PreviewImage),
    Broken { alt: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub label: String,
    pub accuracy: String,
    pub best_guess: bool,
}

impl ResultRow {
    fn new(index: usize, classification: &Classification) -> Self {
        Self {
            label: classification.label.clone(),
            accuracy: format!(
                "Accuracy Level: {:.2}%",
                classification.confidence * 100.0
            ),
            best_guess: index == 0,
        }
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.label, self.accuracy)
    }
}

pub fn view(state: &State) -> View {
    if state.phase() == Phase::Loading {
        return View::Loading {
            message: LOADING_MESSAGE,
        };
    }

    let notice = match &state.readiness {
        Readiness::Unavailable { reason } => Some(format!("Model unavailable: {}", reason)),
        _ => None,
    };

    let with_image = state.phase() == Phase::ReadyWithImage;

    let preview = if with_image {
        Some(match &state.preview {
            Preview::Loaded(image) => PreviewView::Image(image.clone()),
            Preview::Failed(reason) => PreviewView::Broken {
                alt: PREVIEW_ALT,
                reason: reason.clone(),
            },
            Preview::Loading | Preview::None => PreviewView::Loading,
        })
    } else {
        None
    };

    View::Form(FormView {
        url_input: state.url_input.clone(),
        notice,
        preview,
        show_classify_button: with_image,
        results: state
            .results
            .iter()
            .enumerate()
            .map(|(index, classification)| ResultRow::new(index, classification))
            .collect(),
    })
}
