pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{build_image_search_prompt, GroundedSearchClient, SearchImagesUseCase};

pub use application::session::{
    update, Effect, Msg, ResultsView, SessionState, SessionView, SourceLink,
    GENERIC_FAILURE_MESSAGE,
};

pub use connector::{
    Container, ContainerConfig, GeminiClient, GeminiConfig, MockSearchClient,
    MISSING_API_KEY_MESSAGE,
};

pub use connector::tui::TuiApp;

pub use domain::{
    Citation, DomainError, GroundedAnswer, LifecycleState, SearchQuery, SearchResult, Source,
};
