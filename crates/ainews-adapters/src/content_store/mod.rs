//! Content store adapters.

mod json;

pub use json::JsonContentStore;
