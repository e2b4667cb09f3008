//! # Domain Layer
//!
//! Queries, grounded answers, normalized search results and the search
//! lifecycle. Independent of the provider and of the terminal.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
