use crate::domain::SearchQuery;

/// Builds the single prompt sent to the provider for an image-search query.
///
/// The model is asked to read the query as a request for pictures, suggest
/// search terms and describe what matching images should show. Grounding
/// supplies the web sources; the prompt does not ask for links.
pub fn build_image_search_prompt(query: &SearchQuery) -> String {
    format!(
        "A user is searching for images and described what they want as: \"{}\".\n\
         \n\
         Treat this as an image search request. Using web search:\n\
         1. List the most relevant descriptive search terms for finding these images.\n\
         2. Summarize what the matching images should depict: subjects, setting, \
         style, colors and mood.\n\
         \n\
         Format the answer in Markdown.",
        query.text()
    )
}
