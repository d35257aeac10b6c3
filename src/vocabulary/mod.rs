//! Vocabulary records and client-side classification
//!
//! This module provides:
//! - Record, candidate and history entities shared with the backend
//! - Pure predicates (leech, struggling, recent, solid) for filter chips
//! - Filtering, free-text search, stable ordering and one-pass chip counts

pub mod classifier;
pub mod models;

pub use classifier::{
    count_words, filter_words, is_leech, is_recent, is_solid, is_struggling, matches_query,
    review_category, sort_words, FilterCounts, ReviewCategory, WordFilter, WordOrder,
};
pub use models::*;
