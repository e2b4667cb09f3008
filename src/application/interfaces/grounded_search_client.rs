use async_trait::async_trait;

use crate::domain::{DomainError, GroundedAnswer};

/// Sends a prompt to a generative model with web-search grounding enabled.
///
/// Implementors encapsulate transport, credentials and the vendor's response
/// shape. They must return the answer text verbatim together with every
/// citation the provider attached, complete or not; [`crate::application::SearchImagesUseCase`]
/// decides which citations are displayable.
#[async_trait]
pub trait GroundedSearchClient: Send + Sync {
    /// Submit `prompt` with grounding enabled and return the raw answer.
    ///
    /// Missing credentials must be reported as [`DomainError::Configuration`]
    /// without touching the network.
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedAnswer, DomainError>;

    fn model_name(&self) -> &str;
}
