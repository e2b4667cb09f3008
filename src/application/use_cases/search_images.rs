use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::GroundedSearchClient;
use crate::application::use_cases::prompt::build_image_search_prompt;
use crate::domain::{DomainError, SearchQuery, SearchResult};

/// Turns a query into one grounded provider call and normalizes the answer.
pub struct SearchImagesUseCase {
    client: Arc<dyn GroundedSearchClient>,
}

impl SearchImagesUseCase {
    pub fn new(client: Arc<dyn GroundedSearchClient>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, query: &SearchQuery) -> Result<SearchResult, DomainError> {
        info!(
            "Searching for: {} (model={})",
            query.text(),
            self.client.model_name()
        );

        let start_time = Instant::now();
        let prompt = build_image_search_prompt(query);
        debug!("Prompt: {prompt}");

        let answer = match self.client.generate_grounded(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Search failed after {:?}: {e}", start_time.elapsed());
                return Err(e);
            }
        };

        let citation_count = answer.citations().len();
        let result = SearchResult::from_answer(answer);

        if result.sources().len() < citation_count {
            debug!(
                "Dropped {} incomplete citations",
                citation_count - result.sources().len()
            );
        }

        info!(
            "Search completed in {:?}: {} chars, {} sources",
            start_time.elapsed(),
            result.text().len(),
            result.sources().len()
        );

        Ok(result)
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}
