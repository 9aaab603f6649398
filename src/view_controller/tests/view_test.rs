use super::fixture::{blob, cat_and_dog, preview};
use crate::error::Error;
use crate::view_controller::core::{init, transition, Event, State};
use crate::view_controller::view::{view, PreviewView, View, LOADING_MESSAGE, PREVIEW_ALT};

fn ready() -> State {
    let (state, _) = init();
    let (state, _) = transition(state, Event::ModelLoadDone(Ok(())));
    state
}

fn form(state: &State) -> crate::view_controller::view::FormView {
    match view(state) {
        View::Form(form) => form,
        other => panic!("expected form, got {:?}", other),
    }
}

#[test]
fn test_loading_renders_only_message() {
    let (state, _) = init();

    assert_eq!(
        view(&state),
        View::Loading {
            message: LOADING_MESSAGE
        }
    );
    assert_eq!(LOADING_MESSAGE, "Initializing Model...");
}

#[test]
fn test_ready_empty_has_no_preview_or_classify_button() {
    let form = form(&ready());

    assert_eq!(form.preview, None);
    assert!(!form.show_classify_button);
    assert!(form.results.is_empty());
    assert_eq!(form.notice, None);
}

#[test]
fn test_empty_url_has_no_classify_button() {
    let (state, _) = transition(ready(), Event::UrlChanged(String::new()));

    let form = form(&state);

    assert!(!form.show_classify_button);
    assert_eq!(form.preview, None);
}

#[test]
fn test_image_shows_preview_and_classify_button() {
    let (state, _) = transition(ready(), Event::FileSelected(Some(blob(1))));
    let (state, _) = transition(
        state,
        Event::PreviewLoadDone {
            generation: 1,
            result: Ok(preview(1)),
        },
    );

    let form = form(&state);

    assert_eq!(form.preview, Some(PreviewView::Image(preview(1))));
    assert!(form.show_classify_button);
}

#[test]
fn test_broken_preview_uses_alt_text() {
    let (state, _) = transition(ready(), Event::UrlChanged("x".to_string()));
    let (state, _) = transition(
        state,
        Event::PreviewLoadDone {
            generation: 1,
            result: Err(Error::UnsupportedUrl("x".to_string())),
        },
    );

    let form = form(&state);

    assert!(matches!(
        form.preview,
        Some(PreviewView::Broken { alt, .. }) if alt == PREVIEW_ALT
    ));
    assert!(form.show_classify_button);
}

#[test]
fn test_results_are_formatted_with_best_guess_first() {
    let (state, _) = transition(ready(), Event::FileSelected(Some(blob(1))));
    let state = State {
        results: cat_and_dog(),
        ..state
    };

    let rows = form(&state).results;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].to_string(), "cat — Accuracy Level: 91.00%");
    assert!(rows[0].best_guess);
    assert_eq!(rows[1].to_string(), "dog — Accuracy Level: 5.00%");
    assert!(!rows[1].best_guess);
}

#[test]
fn test_unavailable_model_shows_notice() {
    let (state, _) = init();
    let (state, _) = transition(state, Event::ModelLoadDone(Err(Error::ModelUnavailable)));

    let form = form(&state);

    assert_eq!(
        form.notice,
        Some("Model unavailable: model is not available".to_string())
    );
}

#[test]
fn test_text_field_mirrors_state() {
    let (state, _) = transition(ready(), Event::UrlChanged("https://x/y.png".to_string()));

    assert_eq!(form(&state).url_input, "https://x/y.png");
}
