//! # Application Layer
//!
//! The grounded-search port, the search use case and the pure session state
//! machine that drives the terminal UI.

pub mod interfaces;
pub mod session;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
