//! # Recommendation Engine
//!
//! Picks the next activity to suggest from the catalog.
//!
//! ## Algorithm
//! 1. Empty catalog -> `RecommendError::EmptyCatalog`
//! 2. Empty diary -> random pick
//! 3. Collect names rated >= `LIKED_RATING_THRESHOLD`; none -> random pick
//! 4. Fit a TF-IDF space over every catalog description
//! 5. Average the vectors of the liked catalog rows into a profile;
//!    no liked row left in the catalog -> random pick
//! 6. Score each activity by cosine similarity to the profile
//! 7. Return the top score, earliest catalog position on ties
//!
//! The engine only reads its inputs. The random source is the only state
//! that changes between calls.

use crate::error::{RecommendError, Result};
use crate::profile::{UserProfile, liked_activity_names};
use crate::random::{RandomSource, ThreadRandom};
use crate::tfidf::TfidfMatrix;
use crate::vector::{argmax_first, cosine_similarity};
use data_loader::{ActivityRecord, LogEntry};
use std::fmt;
use tracing::{debug, instrument};

/// Why the engine fell back to a random pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The diary has no entries
    EmptyLog,
    /// No diary entry reaches the liked threshold
    NoLikedActivities,
    /// Liked names exist, but none of them is in the catalog anymore
    LikedNotInCatalog,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FallbackReason::EmptyLog => "the diary is empty",
            FallbackReason::NoLikedActivities => "no activity has been rated highly yet",
            FallbackReason::LikedNotInCatalog => {
                "highly rated activities are no longer in the catalog"
            }
        };
        f.write_str(text)
    }
}

/// How a recommendation was chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Best cosine match against the user profile
    ContentBased {
        score: f64,
        /// Number of catalog rows the profile was built from
        matched_liked: usize,
    },
    RandomFallback(FallbackReason),
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::ContentBased {
                score,
                matched_liked,
            } => write!(
                f,
                "similarity {:.3} to a profile of {} liked activities",
                score, matched_liked
            ),
            Strategy::RandomFallback(reason) => write!(f, "random pick because {}", reason),
        }
    }
}

/// A chosen activity together with where it sits and why it was picked.
///
/// `activity` always borrows from the catalog that was passed in.
#[derive(Debug, Clone, Copy)]
pub struct Recommendation<'a> {
    pub index: usize,
    pub activity: &'a ActivityRecord,
    pub strategy: Strategy,
}

/// Content-based activity recommender
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine<R = ThreadRandom> {
    random: R,
}

impl<R: RandomSource> RecommendationEngine<R> {
    /// Create an engine that uses `random` for the fallback path
    pub fn new(random: R) -> Self {
        Self { random }
    }

    /// Recommend one activity from `activities`.
    ///
    /// # Errors
    /// `RecommendError::EmptyCatalog` if `activities` is empty.
    pub fn recommend<'a>(
        &mut self,
        activities: &'a [ActivityRecord],
        log: &[LogEntry],
    ) -> Result<&'a ActivityRecord> {
        self.explain(activities, log).map(|rec| rec.activity)
    }

    /// Same as `recommend`, but also reports the position and strategy.
    #[instrument(skip(self, activities, log), fields(catalog_len = activities.len(), log_len = log.len()))]
    pub fn explain<'a>(
        &mut self,
        activities: &'a [ActivityRecord],
        log: &[LogEntry],
    ) -> Result<Recommendation<'a>> {
        if activities.is_empty() {
            return Err(RecommendError::EmptyCatalog);
        }
        if log.is_empty() {
            return Ok(self.random_pick(activities, FallbackReason::EmptyLog));
        }

        let liked = liked_activity_names(log);
        if liked.is_empty() {
            return Ok(self.random_pick(activities, FallbackReason::NoLikedActivities));
        }

        let matrix = TfidfMatrix::fit(activities.iter().map(|a| a.description.as_str()));
        let profile = match UserProfile::build(&matrix, activities, &liked) {
            Some(profile) => profile,
            None => {
                return Ok(self.random_pick(activities, FallbackReason::LikedNotInCatalog));
            }
        };

        let scores = score_against(&matrix, &profile);
        // Non-empty catalog means non-empty scores
        let index = argmax_first(&scores).unwrap_or(0);

        debug!(
            "Profile from {} liked rows; best score {:.4} at position {}",
            profile.matched().len(),
            scores[index],
            index
        );

        Ok(Recommendation {
            index,
            activity: &activities[index],
            strategy: Strategy::ContentBased {
                score: scores[index],
                matched_liked: profile.matched().len(),
            },
        })
    }

    fn random_pick<'a>(
        &mut self,
        activities: &'a [ActivityRecord],
        reason: FallbackReason,
    ) -> Recommendation<'a> {
        let index = self.random.pick_index(activities.len()).min(activities.len() - 1);
        debug!("Falling back to random pick ({}): position {}", reason, index);

        Recommendation {
            index,
            activity: &activities[index],
            strategy: Strategy::RandomFallback(reason),
        }
    }
}

/// Cosine similarity of every document row to the profile, in row order
pub fn score_against(matrix: &TfidfMatrix, profile: &UserProfile) -> Vec<f64> {
    matrix
        .rows()
        .map(|row| cosine_similarity(row, profile.vector()))
        .collect()
}
