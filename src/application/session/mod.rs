//! Pure search-session state machine: messages in, state and effects out.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{SessionState, GENERIC_FAILURE_MESSAGE};
pub use update::update;
pub use view_model::{ResultsView, SessionView, SourceLink};
