//! Build the user's preference profile from the diary.
//!
//! The profile is the mean TF-IDF vector of every catalog activity the user
//! rated highly. It is never stored; each request rebuilds it.

use crate::tfidf::TfidfMatrix;
use crate::vector::mean;
use data_loader::{ActivityRecord, LogEntry};
use std::collections::HashSet;

/// Ratings at or above this value count as "liked" (1-5 scale)
pub const LIKED_RATING_THRESHOLD: i32 = 4;

/// Names of activities with at least one rating >= `LIKED_RATING_THRESHOLD`
pub fn liked_activity_names(log: &[LogEntry]) -> HashSet<&str> {
    log.iter()
        .filter(|entry| entry.rating >= LIKED_RATING_THRESHOLD)
        .map(|entry| entry.activity_name.as_str())
        .collect()
}

/// Averaged feature vector of the liked activities.
#[derive(Debug, Clone)]
pub struct UserProfile {
    vector: Vec<f64>,
    /// Catalog positions the profile was built from, in catalog order
    matched: Vec<usize>,
}

impl UserProfile {
    /// Build the profile from the catalog rows whose name is in `liked`.
    ///
    /// `matrix` must have been fit on `activities` in the same order.
    /// Every matching row contributes, including rows with a duplicated name.
    /// Returns `None` when no catalog row matches.
    pub fn build(
        matrix: &TfidfMatrix,
        activities: &[ActivityRecord],
        liked: &HashSet<&str>,
    ) -> Option<Self> {
        debug_assert_eq!(matrix.n_docs(), activities.len());

        let matched: Vec<usize> = activities
            .iter()
            .enumerate()
            .filter(|(_, a)| liked.contains(a.name.as_str()))
            .map(|(i, _)| i)
            .collect();

        if matched.is_empty() {
            return None;
        }

        let vector = mean(matched.iter().map(|&i| matrix.row(i)), matrix.n_terms());
        Some(Self { vector, matched })
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn matched(&self) -> &[usize] {
        &self.matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(name: &str, rating: i32) -> LogEntry {
        LogEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            activity_name: name.to_string(),
            rating,
            notes: String::new(),
            photo_ref: None,
        }
    }

    #[test]
    fn test_liked_threshold() {
        let log = vec![
            entry("Hike", 5),
            entry("Movie", 3),
            entry("Museum", 4),
            entry("Hike", 1),
        ];
        let liked = liked_activity_names(&log);
        assert_eq!(liked.len(), 2);
        assert!(liked.contains("Hike"));
        assert!(liked.contains("Museum"));
        assert!(!liked.contains("Movie"));
    }

    #[test]
    fn test_profile_is_mean_of_matches() {
        let activities = vec![
            ActivityRecord::new("Hike", "trail"),
            ActivityRecord::new("Movie", "cinema"),
            ActivityRecord::new("Swim", "sea"),
        ];
        let matrix = TfidfMatrix::fit(activities.iter().map(|a| a.description.as_str()));
        let liked: HashSet<&str> = ["Hike", "Swim", "Gone"].into_iter().collect();

        let profile = UserProfile::build(&matrix, &activities, &liked).unwrap();
        assert_eq!(profile.matched(), &[0, 2]);

        let trail = matrix.term_index("trail").unwrap();
        let sea = matrix.term_index("sea").unwrap();
        let cinema = matrix.term_index("cinema").unwrap();
        assert!((profile.vector()[trail] - 0.5).abs() < 1e-12);
        assert!((profile.vector()[sea] - 0.5).abs() < 1e-12);
        assert_eq!(profile.vector()[cinema], 0.0);
    }

    #[test]
    fn test_profile_without_matches() {
        let activities = vec![ActivityRecord::new("Hike", "trail")];
        let matrix = TfidfMatrix::fit(activities.iter().map(|a| a.description.as_str()));
        let liked: HashSet<&str> = ["Karaoke"].into_iter().collect();

        assert!(UserProfile::build(&matrix, &activities, &liked).is_none());
    }
}
