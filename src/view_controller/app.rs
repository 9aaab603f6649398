use crate::image_source::blob_store::BlobStore;
use crate::library::logger::interface::Logger;
use crate::library::state_machine::StateMachine;
use crate::view_controller::core::{init, transition, Effect, Event, State};
use crate::view_controller::render::Render;
use crate::view_controller::run_effect::RunEffect;
use crate::view_controller::view::view;
use std::sync::mpsc::Sender;
use std::sync::Arc;

type TransitionFn = fn(State, Event) -> (State, Vec<Effect>);
type RunEffectFn = Box<dyn Fn(Effect, Sender<Event>) + Send + Sync>;

pub struct ClassifierApp {
    machine: StateMachine<State, Event, Effect, TransitionFn, RunEffectFn>,
    render: Render,
    blob_store: Arc<BlobStore>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassifierApp {
    pub fn new(
        run_effect: RunEffect,
        blob_store: Arc<BlobStore>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        let run_effect_fn: RunEffectFn =
            Box::new(move |effect, event_sender| run_effect.run_effect(effect, event_sender));

        let machine = StateMachine::new(init(), transition as TransitionFn, run_effect_fn);

        Self {
            machine,
            render: Render::new(blob_store.clone(), logger.clone()),
            blob_store,
            logger: logger.with_namespace("app"),
        }
    }

    pub fn state(&self) -> &State {
        self.machine.state()
    }

    pub fn dispatch(&mut self, event: Event) {
        let _ = self
            .logger
            .info(&format!("Event: {}", event.to_display_string()));
        self.machine.dispatch(event);
    }

    /// Applies the events effects have reported since the last call.
    pub fn poll(&mut self) -> usize {
        self.machine.poll()
    }
}

impl eframe::App for ClassifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();

        let view = view(self.machine.state());
        for event in self.render.render(ctx, &view) {
            self.dispatch(event);
        }
    }
}

impl Drop for ClassifierApp {
    fn drop(&mut self) {
        self.blob_store.revoke_all();
    }
}
