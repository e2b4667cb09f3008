use async_trait::async_trait;
use tracing::debug;

use crate::application::GroundedSearchClient;
use crate::domain::{Citation, DomainError, GroundedAnswer};

/// Offline [`GroundedSearchClient`] returning a canned answer.
///
/// The citation list always contains one entry without a title so the
/// normalization step is visible in the UI.
pub struct MockSearchClient;

impl MockSearchClient {
    pub fn new() -> Self {
        Self
    }

    /// The text between the first and last quote of the first quoted line,
    /// so quotes inside the query survive.
    fn quoted_query(prompt: &str) -> &str {
        prompt
            .lines()
            .find_map(|line| {
                let start = line.find('"')? + 1;
                let end = line.rfind('"')?;
                line.get(start..end)
            })
            .filter(|q| !q.is_empty())
            .unwrap_or("your query")
    }
}

impl Default for MockSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroundedSearchClient for MockSearchClient {
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedAnswer, DomainError> {
        let query = Self::quoted_query(prompt);
        debug!("MockSearchClient: answering for {query:?}");

        let text = format!(
            "## Search terms\n\
             \n\
             * {query}\n\
             * {query} photography\n\
             * {query} high resolution\n\
             \n\
             ## What matching images show\n\
             \n\
             Images for **{query}** typically feature the subject in clear focus, \
             natural lighting and a *clean composition*."
        );

        let citations = vec![
            Citation::new(
                Some("Unsplash".to_string()),
                Some("https://unsplash.com/s/photos/search".to_string()),
            ),
            Citation::new(None, Some("https://example.com/untitled".to_string())),
            Citation::new(
                Some("Wikimedia Commons".to_string()),
                Some("https://commons.wikimedia.org/".to_string()),
            ),
        ];

        Ok(GroundedAnswer::new(text, citations))
    }

    fn model_name(&self) -> &str {
        "mock-search"
    }
}
