use crate::domain::Source;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub input: String,
    pub input_enabled: bool,
    pub results: ResultsView,
}

/// Exactly one of these is shown below the query box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Prompt,
    Loading,
    Answer {
        /// Markdown narrative, verbatim.
        text: String,
        sources: Vec<SourceLink>,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub title: String,
    pub uri: String,
    pub host: String,
}

impl From<&Source> for SourceLink {
    fn from(source: &Source) -> Self {
        Self {
            title: source.title().to_string(),
            uri: source.uri().to_string(),
            host: source.host(),
        }
    }
}
