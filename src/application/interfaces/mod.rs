mod grounded_search_client;

pub use grounded_search_client::*;
