//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Grounded search (Gemini over HTTP, plus an offline mock)
//! - Dependency wiring (`Container`)
//! - The terminal UI

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
pub use api::*;
