use crate::error::Error;
use crate::image_classifier::interface::Classification;
use crate::image_source::preview::PreviewImage;
use crate::image_source::source::{BlobUrl, ImageSource};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Readiness {
    #[default]
    Loading,
    Ready,
    Unavailable {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Preview {
    #[default]
    None,
    Loading,
    Loaded(PreviewImage),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub readiness: Readiness,
    pub image_source: Option<ImageSource>,
    /// Bumped on every image source change. Completions tagged with an
    /// older generation are dropped.
    pub generation: u64,
    pub preview: Preview,
    pub results: Vec<Classification>,
    /// Contents of the URL text field.
    pub url_input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    ReadyEmpty,
    ReadyWithImage,
}

impl State {
    pub fn phase(&self) -> Phase {
        if self.readiness == Readiness::Loading {
            Phase::Loading
        } else if self.has_renderable_image() {
            Phase::ReadyWithImage
        } else {
            Phase::ReadyEmpty
        }
    }

    pub fn has_renderable_image(&self) -> bool {
        self.image_source
            .as_ref()
            .is_some_and(ImageSource::is_renderable)
    }

    fn current_blob(&self) -> Option<BlobUrl> {
        self.image_source
            .as_ref()
            .and_then(ImageSource::blob)
            .cloned()
    }

    /// Replaces the image source. Results are cleared and the previous
    /// blob, if any, is released.
    fn with_image_source(self, image_source: Option<ImageSource>) -> (State, Vec<Effect>) {
        let mut effects = vec![];

        if let Some(previous) = self.current_blob() {
            let superseded = image_source
                .as_ref()
                .and_then(ImageSource::blob)
                .map_or(true, |next| *next != previous);
            if superseded {
                effects.push(Effect::RevokeBlob(previous));
            }
        }

        let generation = self.generation + 1;
        let preview = match &image_source {
            Some(source) if source.is_renderable() => {
                effects.push(Effect::LoadPreview {
                    generation,
                    source: source.clone(),
                });
                Preview::Loading
            }
            _ => Preview::None,
        };

        (
            State {
                image_source,
                generation,
                preview,
                results: vec![],
                ..self
            },
            effects,
        )
    }
}

#[derive(Debug)]
pub enum Event {
    ModelLoadDone(Result<(), Error>),
    /// `None` when the picker was dismissed without a file.
    FileSelected(Option<BlobUrl>),
    UrlChanged(String),
    PreviewLoadDone {
        generation: u64,
        result: Result<PreviewImage, Error>,
    },
    ClassifyClicked,
    /// `None` when the classification was skipped or failed.
    ClassifyDone {
        generation: u64,
        results: Option<Vec<Classification>>,
    },
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::PreviewLoadDone {
                generation,
                result: Ok(preview),
            } => format!(
                "PreviewLoadDone {{ generation: {}, result: Ok({}x{}) }}",
                generation,
                preview.image.width(),
                preview.image.height()
            ),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadModel,
    LoadPreview {
        generation: u64,
        source: ImageSource,
    },
    Classify {
        generation: u64,
        image: Option<PreviewImage>,
    },
    RevokeBlob(BlobUrl),
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Classify { generation, image } => format!(
                "Classify {{ generation: {}, image: {} }}",
                generation,
                if image.is_some() { "loaded" } else { "missing" }
            ),
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init() -> (State, Vec<Effect>) {
    (State::default(), vec![Effect::LoadModel])
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match event {
        Event::ModelLoadDone(result) => {
            if state.readiness != Readiness::Loading {
                return (state, vec![]);
            }
            let readiness = match result {
                Ok(()) => Readiness::Ready,
                Err(e) => Readiness::Unavailable {
                    reason: e.to_string(),
                },
            };
            (State { readiness, ..state }, vec![])
        }

        Event::FileSelected(blob) => state.with_image_source(blob.map(ImageSource::Blob)),

        Event::UrlChanged(url) => {
            let (state, effects) = state.with_image_source(Some(ImageSource::Url(url.clone())));
            (
                State {
                    url_input: url,
                    ..state
                },
                effects,
            )
        }

        Event::PreviewLoadDone { generation, result } => {
            if generation != state.generation || state.preview != Preview::Loading {
                return (state, vec![]);
            }
            let preview = match result {
                Ok(image) => Preview::Loaded(image),
                Err(e) => Preview::Failed(e.to_string()),
            };
            (State { preview, ..state }, vec![])
        }

        Event::ClassifyClicked => {
            if state.phase() != Phase::ReadyWithImage {
                return (state, vec![]);
            }
            let image = match &state.preview {
                Preview::Loaded(image) => Some(image.clone()),
                _ => None,
            };
            let effects = vec![Effect::Classify {
                generation: state.generation,
                image,
            }];
            (
                State {
                    url_input: String::new(),
                    ..state
                },
                effects,
            )
        }

        Event::ClassifyDone {
            generation,
            results,
        } => match results {
            Some(results) if generation == state.generation => (State { results, ..state }, vec![]),
            _ => (state, vec![]),
        },
    }
}
