use crate::domain::SearchQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one grounded search; its outcome comes back as
    /// [`crate::application::session::Msg::SearchFinished`].
    RunSearch(SearchQuery),
}
