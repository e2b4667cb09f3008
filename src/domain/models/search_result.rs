use serde::{Deserialize, Serialize};

use super::{Citation, GroundedAnswer};

/// A displayable citation: both title and URI are present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    title: String,
    uri: String,
}

impl Source {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }

    /// Returns `None` when the citation lacks a title or a URI.
    pub fn from_citation(citation: Citation) -> Option<Self> {
        let title = citation.title().filter(|t| !t.trim().is_empty())?;
        let uri = citation.uri().filter(|u| !u.trim().is_empty())?;
        Some(Self::new(title, uri))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Host name of the URI, or the whole URI when it cannot be parsed.
    pub fn host(&self) -> String {
        url::Url::parse(&self.uri)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
            .unwrap_or_else(|| self.uri.clone())
    }
}

/// The narrative answer plus its citations, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    text: String,
    sources: Vec<Source>,
}

impl SearchResult {
    pub fn new(text: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            text: text.into(),
            sources,
        }
    }

    /// Keeps the text verbatim and drops citations without a title or URI.
    pub fn from_answer(answer: GroundedAnswer) -> Self {
        let (text, citations) = answer.into_parts();
        let sources = citations
            .into_iter()
            .filter_map(Source::from_citation)
            .collect();
        Self { text, sources }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(title: Option<&str>, uri: Option<&str>) -> Citation {
        Citation::new(title.map(String::from), uri.map(String::from))
    }

    #[test]
    fn test_from_answer_drops_incomplete_citations_in_order() {
        let answer = GroundedAnswer::new(
            "Look for warm-toned landscape photography...",
            vec![
                citation(Some("A"), Some("https://a.example")),
                citation(Some(""), Some("https://b.example")),
                citation(None, Some("https://c.example")),
                citation(Some("D"), None),
                citation(Some("E"), Some("https://e.example")),
                citation(Some("F"), Some("   ")),
            ],
        );

        let result = SearchResult::from_answer(answer);

        assert_eq!(result.text(), "Look for warm-toned landscape photography...");
        assert_eq!(
            result.sources(),
            &[
                Source::new("A", "https://a.example"),
                Source::new("E", "https://e.example"),
            ]
        );
    }

    #[test]
    fn test_from_answer_without_citations_is_empty() {
        let result = SearchResult::from_answer(GroundedAnswer::new("text", vec![]));
        assert!(!result.has_sources());
        assert_eq!(result.text(), "text");
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let text = "  # Heading\n\n* term one\n* term two\n\n";
        let result = SearchResult::from_answer(GroundedAnswer::new(text, vec![]));
        assert_eq!(result.text(), text);
    }

    #[test]
    fn test_source_host() {
        assert_eq!(
            Source::new("A", "https://www.example.com/path?q=1").host(),
            "example.com"
        );
        assert_eq!(
            Source::new("B", "https://vertexaisearch.cloud.google.com/grounding/x").host(),
            "vertexaisearch.cloud.google.com"
        );
        assert_eq!(Source::new("C", "not a url").host(), "not a url");
    }
}
