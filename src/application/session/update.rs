use tracing::debug;

use crate::domain::SearchQuery;

use super::{Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            if state.accepts_input() {
                *state.input_mut() = text;
            }
            Vec::new()
        }
        Msg::CharTyped(c) => {
            if state.accepts_input() {
                state.input_mut().push(c);
            }
            Vec::new()
        }
        Msg::Backspace => {
            if state.accepts_input() {
                state.input_mut().pop();
            }
            Vec::new()
        }
        Msg::ClearInput => {
            if state.accepts_input() {
                state.input_mut().clear();
            }
            Vec::new()
        }
        Msg::SubmitPressed => {
            // Submitting while a search is in flight is rejected outright.
            if !state.accepts_input() {
                debug!("Submit ignored: a search is already in flight");
                return (state, Vec::new());
            }
            match SearchQuery::new(state.input()) {
                Ok(query) => {
                    state.start_loading();
                    vec![Effect::RunSearch(query)]
                }
                Err(_) => Vec::new(),
            }
        }
        Msg::SearchFinished(outcome) => {
            if !state.lifecycle().is_loading() {
                debug!(
                    "Search outcome arrived in state {}",
                    state.lifecycle().as_str()
                );
            }
            match outcome {
                Ok(result) => state.succeed(result),
                Err(message) => state.fail(&message),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
