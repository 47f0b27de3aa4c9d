//! # Algorithms
//!
//! Pure selection and classification logic.

pub mod classification;
pub mod selection;

pub use classification::{classify_error, should_trigger_fallback};
pub use selection::{rank_candidates, Candidate};
