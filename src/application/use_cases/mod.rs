mod prompt;
mod search_images;

pub use prompt::*;
pub use search_images::*;
