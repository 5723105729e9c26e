//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::SearchProvider`]
//! that scrapes a specific search engine's HTML results page.

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoProvider;
