// src/extractors/mod.rs
pub mod listing;

// Re-export key extraction types for convenience
pub use listing::{Listing, ListingExtractor, Record};
