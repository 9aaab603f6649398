use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;

/// Drives a pure `transition` function from a UI loop.
///
/// Events are applied on the caller's thread. Every effect runs on its own
/// thread and reports back by sending events into the channel, which the
/// owner drains with [`StateMachine::poll`] (typically once per frame).
pub struct StateMachine<TState, TEvent, TEffect, T, E>
where
    T: Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync,
    E: Fn(TEffect, Sender<TEvent>) + Send + Sync,
{
    state: TState,
    transition_fn: Arc<T>,
    run_effect_fn: Arc<E>,
    event_sender: Sender<TEvent>,
    event_receiver: Receiver<TEvent>,
}

impl<TState, TEvent, TEffect, T, E> StateMachine<TState, TEvent, TEffect, T, E>
where
    TState: Clone,
    TEvent: Send + 'static,
    TEffect: Send + 'static,
    T: Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync + 'static,
    E: Fn(TEffect, Sender<TEvent>) + Send + Sync + 'static,
{
    pub fn new(init: (TState, Vec<TEffect>), transition_fn: T, run_effect_fn: E) -> Self {
        let (event_sender, event_receiver) = channel();
        let (state, effects) = init;

        let machine = Self {
            state,
            transition_fn: Arc::new(transition_fn),
            run_effect_fn: Arc::new(run_effect_fn),
            event_sender,
            event_receiver,
        };

        machine.spawn_effects(effects);

        machine
    }

    pub fn state(&self) -> &TState {
        &self.state
    }

    pub fn dispatch(&mut self, event: TEvent) {
        let (new_state, effects) = (self.transition_fn)(self.state.clone(), event);
        self.state = new_state;
        self.spawn_effects(effects);
    }

    /// Applies every event that effects have reported so far.
    /// Returns the number of events applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.event_receiver.try_recv() {
                Ok(event) => {
                    self.dispatch(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return applied,
            }
        }
    }

    fn spawn_effects(&self, effects: Vec<TEffect>) {
        for effect in effects {
            let effect_sender = self.event_sender.clone();
            let run_effect_fn = Arc::clone(&self.run_effect_fn);
            std::thread::spawn(move || {
                run_effect_fn(effect, effect_sender);
            });
        }
    }
}
