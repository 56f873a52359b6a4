//! News data path: per-country tables, record normalization and tagging.
//!
//! Records coming out of the store are loosely shaped (headline and link may
//! be plain strings, JSON-encoded strings or objects with varying keys).
//! Everything past [`record::normalize`] sees a single canonical [`NewsItem`].

pub mod error;
pub mod record;
pub mod source;
pub mod tagging;

pub use error::*;
pub use record::*;
pub use source::*;
pub use tagging::*;
