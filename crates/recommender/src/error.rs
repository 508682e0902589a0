//! Error types for the recommender crate.

use thiserror::Error;

/// The only failure the engine can report.
///
/// Every other degenerate input (empty diary, nothing rated highly, liked
/// activities gone from the catalog, blank descriptions) is handled by
/// falling back to a random pick.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendError {
    /// The activity catalog is empty, so there is nothing to pick from
    #[error("the activity catalog is empty, nothing to recommend yet")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, RecommendError>;
