//! Full-screen terminal front end.
mod app;
mod markdown;
mod render;
mod theme;

pub use app::{map_key, paste_message, KeyAction, TuiApp};
pub use markdown::render_markdown;
