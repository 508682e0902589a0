//! Content-based recommendation of the next activity.
//!
//! This crate provides:
//! - `RecommendationEngine`, which turns the activity catalog and the diary into one pick
//! - `TfidfMatrix`, the vector space built over activity descriptions
//! - `UserProfile`, the averaged vector of highly rated activities
//! - `RandomSource` and its implementations for the fallback path
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{RecommendationEngine, SeededRandom};
//!
//! let mut engine = RecommendationEngine::new(SeededRandom::new(7));
//! let pick = engine.recommend(workbook.activities(), workbook.diary())?;
//! println!("Try: {}", pick.name);
//! ```

pub mod engine;
pub mod error;
pub mod profile;
pub mod random;
pub mod text;
pub mod tfidf;
pub mod vector;

// Re-export main types
pub use engine::{FallbackReason, Recommendation, RecommendationEngine, Strategy};
pub use error::{RecommendError, Result};
pub use profile::{LIKED_RATING_THRESHOLD, UserProfile, liked_activity_names};
pub use random::{FixedIndex, RandomSource, SeededRandom, ThreadRandom};
pub use text::ENGLISH_STOP_WORDS;
pub use tfidf::TfidfMatrix;
