use serde::{Deserialize, Serialize};

/// A citation exactly as the provider reported it. Either field may be
/// missing; filtering happens when the answer is turned into a
/// [`super::SearchResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    title: Option<String>,
    uri: Option<String>,
}

impl Citation {
    pub fn new(title: Option<String>, uri: Option<String>) -> Self {
        Self { title, uri }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}

/// Raw grounded answer returned by a [`crate::application::GroundedSearchClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundedAnswer {
    text: String,
    citations: Vec<Citation>,
}

impl GroundedAnswer {
    pub fn new(text: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            text: text.into(),
            citations,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn into_parts(self) -> (String, Vec<Citation>) {
        (self.text, self.citations)
    }
}
