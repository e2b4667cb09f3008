mod gemini_client;
mod mock_search_client;

pub use gemini_client::*;
pub use mock_search_client::*;
