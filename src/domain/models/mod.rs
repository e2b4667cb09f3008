mod grounded_answer;
mod lifecycle;
mod search_query;
mod search_result;

pub use grounded_answer::*;
pub use lifecycle::*;
pub use search_query::*;
pub use search_result::*;
