//! Context retrieval adapters

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoRetriever;
