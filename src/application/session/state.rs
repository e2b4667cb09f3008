use crate::domain::{LifecycleState, SearchResult};

use super::view_model::{ResultsView, SessionView, SourceLink};

/// Shown when a failure carries no description of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong while searching. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    input: String,
    lifecycle: LifecycleState,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    /// Input is frozen while a search is in flight.
    pub fn accepts_input(&self) -> bool {
        !self.lifecycle.is_loading()
    }

    pub fn view(&self) -> SessionView {
        let results = match &self.lifecycle {
            LifecycleState::Idle => ResultsView::Prompt,
            LifecycleState::Loading => ResultsView::Loading,
            LifecycleState::Succeeded(result) => ResultsView::Answer {
                text: result.text().to_string(),
                sources: result.sources().iter().map(SourceLink::from).collect(),
            },
            LifecycleState::Failed(message) => ResultsView::Error(message.clone()),
        };

        SessionView {
            input: self.input.clone(),
            input_enabled: self.accepts_input(),
            results,
        }
    }

    pub(crate) fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub(crate) fn start_loading(&mut self) {
        self.lifecycle = LifecycleState::Loading;
    }

    pub(crate) fn succeed(&mut self, result: SearchResult) {
        self.lifecycle = LifecycleState::Succeeded(result);
    }

    pub(crate) fn fail(&mut self, message: &str) {
        let message = message.trim();
        let message = if message.is_empty() {
            GENERIC_FAILURE_MESSAGE
        } else {
            message
        };
        self.lifecycle = LifecycleState::Failed(message.to_string());
    }
}
