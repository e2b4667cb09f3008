use std::sync::Arc;

use tracing::{debug, warn};

use crate::connector::adapter::{GeminiClient, GeminiConfig, MockSearchClient};
use crate::{GroundedSearchClient, SearchImagesUseCase};

pub struct ContainerConfig {
    /// Answer from canned data instead of calling Gemini.
    pub mock: bool,
    pub gemini: GeminiConfig,
}

pub struct Container {
    search_client: Arc<dyn GroundedSearchClient>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let search_client: Arc<dyn GroundedSearchClient> = if config.mock {
            debug!("Using mock search client");
            Arc::new(MockSearchClient::new())
        } else {
            if !config.gemini.has_api_key() {
                // Not fatal: the first search reports the missing key in the UI.
                warn!("No Gemini API key configured; searches will fail until it is set");
            }
            let client = GeminiClient::new(config.gemini.clone());
            debug!("Using Gemini at {}", client.endpoint());
            Arc::new(client)
        };

        Self {
            search_client,
            config,
        }
    }

    /// Build a container around an existing client (used by tests and
    /// embedders that bring their own provider).
    pub fn with_client(search_client: Arc<dyn GroundedSearchClient>) -> Self {
        Self {
            search_client,
            config: ContainerConfig {
                mock: false,
                gemini: GeminiConfig::default(),
            },
        }
    }

    pub fn search_use_case(&self) -> SearchImagesUseCase {
        SearchImagesUseCase::new(self.search_client.clone())
    }

    pub fn model_name(&self) -> &str {
        self.search_client.model_name()
    }

    pub fn is_mock(&self) -> bool {
        self.config.mock
    }
}
