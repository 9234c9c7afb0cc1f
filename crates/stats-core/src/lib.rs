//! Shared types for the chat statistics workspace.
//!
//! Holds the message and report models, the error type, run settings and the
//! static configuration (identity map, stopwords) consumed by the aggregation
//! pipeline in `stats-data`.

pub mod error;
pub mod identity;
pub mod models;
pub mod settings;
pub mod stopwords;
pub mod time_utils;
