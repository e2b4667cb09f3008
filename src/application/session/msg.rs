use crate::domain::SearchResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Replace the whole query text (e.g. a paste).
    InputChanged(String),
    /// User typed a character into the query box.
    CharTyped(char),
    /// User deleted the last character.
    Backspace,
    /// User cleared the query box.
    ClearInput,
    /// User asked to run the search.
    SubmitPressed,
    /// The in-flight search resolved. Errors carry their display text.
    SearchFinished(Result<SearchResult, String>),
    NoOp,
}
