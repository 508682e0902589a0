//! # Dashboard Service
//!
//! Owns a loaded workbook and derives every dashboard view from it:
//! 1. Sidebar status (diary size and progress toward the diary goal)
//! 2. Rating timeline for the line chart
//! 3. Calendar events for the timeline tab
//! 4. Restaurant radar profiles
//! 5. Activity choices for the logbook form
//! 6. The "next activity" recommendation
//!
//! The workbook sits behind an `Arc`, so clones of the service are cheap and
//! can be handed to concurrent requests.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use data_loader::{RestaurantReview, Workbook};
use recommender::{RandomSource, RecommendationEngine, Strategy};

use crate::views::*;

/// Version string shown in the sidebar
pub const APP_VERSION: &str = "1.0.4";

/// Diary size at which the progress bar is full
pub const PROGRESS_TARGET_LOGS: usize = 50;

/// Format used for calendar event start times
const CALENDAR_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder offered by the logbook picker when the catalog is empty
const NO_ACTIVITY_CHOICE: &str = "None";

#[derive(Debug, Clone)]
pub struct Dashboard {
    workbook: Arc<Workbook>,
}

impl Dashboard {
    pub fn new(workbook: Arc<Workbook>) -> Self {
        Self { workbook }
    }

    /// Load worksheets from `data_dir`, failing if any required sheet is bad
    pub fn load(data_dir: &Path) -> Result<Self> {
        let workbook = Workbook::load_from_dir(data_dir)
            .with_context(|| format!("Failed to load worksheets from {}", data_dir.display()))?;
        Ok(Self::new(Arc::new(workbook)))
    }

    /// Load worksheets from `data_dir`, using the sample workbook on failure
    pub fn load_or_sample(data_dir: &Path) -> Self {
        Self::new(Arc::new(Workbook::load_or_sample(data_dir)))
    }

    pub fn sample() -> Self {
        Self::new(Arc::new(Workbook::sample()))
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn status(&self) -> SystemStatus {
        let log_count = self.workbook.diary().len();
        SystemStatus {
            version: APP_VERSION,
            log_count,
            progress: (log_count as f64 / PROGRESS_TARGET_LOGS as f64).min(1.0),
        }
    }

    /// Diary ratings ordered by date; entries on the same date keep diary order
    pub fn rating_timeline(&self) -> Vec<RatingPoint> {
        let mut points: Vec<RatingPoint> = self
            .workbook
            .diary()
            .iter()
            .map(|entry| RatingPoint {
                date: entry.date,
                rating: entry.rating,
                activity: entry.activity_name.clone(),
            })
            .collect();
        points.sort_by_key(|p| p.date);
        points
    }

    /// One calendar event per diary entry, in diary order
    pub fn calendar_events(&self) -> Vec<CalendarEvent> {
        self.workbook
            .diary()
            .iter()
            .map(|entry| CalendarEvent {
                title: entry.activity_name.clone(),
                start: entry.date.format(CALENDAR_TIME_FORMAT).to_string(),
            })
            .collect()
    }

    pub fn restaurant_profiles(&self) -> Vec<RestaurantProfile> {
        self.workbook
            .restaurants()
            .iter()
            .map(|review| RestaurantProfile {
                name: review.name.clone(),
                location: review.location.clone(),
                cuisine: review.cuisine.clone(),
                total: review.total,
                review: review.review.clone(),
                radar: radar_polygon(review),
            })
            .collect()
    }

    /// Distinct activity names in catalog order
    pub fn activity_choices(&self) -> Vec<String> {
        let activities = self.workbook.activities();
        if activities.is_empty() {
            return vec![NO_ACTIVITY_CHOICE.to_string()];
        }

        let mut seen = HashSet::new();
        activities
            .iter()
            .filter(|a| seen.insert(a.name.as_str()))
            .map(|a| a.name.clone())
            .collect()
    }

    /// Recommend the next activity.
    ///
    /// # Errors
    /// `RecommendError::EmptyCatalog` when the catalog has no rows. Callers
    /// should show that as "nothing to recommend yet".
    #[instrument(skip(self, random))]
    pub fn recommend<R: RandomSource>(
        &self,
        random: R,
    ) -> recommender::Result<ActivityRecommendation> {
        let start = Instant::now();
        let mut engine = RecommendationEngine::new(random);
        let rec = engine.explain(self.workbook.activities(), self.workbook.diary())?;

        info!(
            "Recommended '{}' ({}) in {:?}",
            rec.activity.name,
            rec.strategy,
            start.elapsed()
        );

        let score = match rec.strategy {
            Strategy::ContentBased { score, .. } => Some(score),
            Strategy::RandomFallback(_) => None,
        };

        Ok(ActivityRecommendation {
            name: rec.activity.name.clone(),
            description: rec.activity.description.clone(),
            location: rec.activity.location.clone(),
            energy_level: rec.activity.energy_level,
            budget: rec.activity.budget,
            explanation: rec.strategy.to_string(),
            score,
        })
    }
}

/// Radar axes for a review, closed by repeating the first axis
fn radar_polygon(review: &RestaurantReview) -> Vec<RadarPoint> {
    let axes = [
        ("Location", review.location_score),
        ("Menu", review.menu_score),
        ("Service", review.service_score),
        ("Cost", review.cost_score),
    ];

    axes.iter()
        .chain(axes.first())
        .map(|&(axis, value)| RadarPoint { axis, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use data_loader::{ActivityRecord, LogEntry};
    use recommender::{FixedIndex, RecommendError};

    fn entry(name: &str, rating: i32, day: u32) -> LogEntry {
        LogEntry {
            date: NaiveDate::from_ymd_opt(2024, 7, day)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            activity_name: name.to_string(),
            rating,
            notes: String::new(),
            photo_ref: None,
        }
    }

    fn create_test_dashboard() -> Dashboard {
        let mut workbook = Workbook::new();
        workbook.push_activity(ActivityRecord::new("Hike", "outdoor trail walking nature"));
        workbook.push_activity(ActivityRecord::new("Movie", "indoor film cinema"));
        workbook.push_activity(ActivityRecord::new("Hike", ""));
        workbook.push_log_entry(entry("Movie", 3, 12));
        workbook.push_log_entry(entry("Hike", 5, 4));
        workbook.push_restaurant(RestaurantReview {
            name: "Buffet da Pepi".to_string(),
            location: "Trieste".to_string(),
            cuisine: "Local".to_string(),
            location_score: 6.0,
            menu_score: 9.0,
            service_score: 7.0,
            cost_score: 8.0,
            total: 7.5,
            review: "Porzina!".to_string(),
        });
        Dashboard::new(Arc::new(workbook))
    }

    #[test]
    fn test_status_progress() {
        let status = create_test_dashboard().status();
        assert_eq!(status.version, APP_VERSION);
        assert_eq!(status.log_count, 2);
        assert!((status.progress - 0.04).abs() < 1e-12);

        let mut workbook = Workbook::new();
        for day in 1..=28 {
            workbook.push_log_entry(entry("Hike", 4, day));
            workbook.push_log_entry(entry("Movie", 2, day));
        }
        let full = Dashboard::new(Arc::new(workbook)).status();
        assert_eq!(full.log_count, 56);
        assert_eq!(full.progress, 1.0);
    }

    #[test]
    fn test_rating_timeline_sorted_by_date() {
        let timeline = create_test_dashboard().rating_timeline();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].activity, "Hike");
        assert_eq!(timeline[1].rating, 3);
    }

    #[test]
    fn test_calendar_events_keep_diary_order() {
        let events = create_test_dashboard().calendar_events();
        assert_eq!(
            events,
            vec![
                CalendarEvent {
                    title: "Movie".to_string(),
                    start: "2024-07-12 09:30:00".to_string(),
                },
                CalendarEvent {
                    title: "Hike".to_string(),
                    start: "2024-07-04 09:30:00".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_restaurant_radar_is_closed() {
        let profiles = create_test_dashboard().restaurant_profiles();
        assert_eq!(profiles.len(), 1);

        let radar = &profiles[0].radar;
        let axes: Vec<&str> = radar.iter().map(|p| p.axis).collect();
        assert_eq!(axes, vec!["Location", "Menu", "Service", "Cost", "Location"]);
        assert_eq!(radar[1].value, 9.0);
        assert_eq!(radar.first(), radar.last());
    }

    #[test]
    fn test_activity_choices() {
        assert_eq!(create_test_dashboard().activity_choices(), vec!["Hike", "Movie"]);

        let empty = Dashboard::new(Arc::new(Workbook::new()));
        assert_eq!(empty.activity_choices(), vec!["None"]);
    }

    #[test]
    fn test_recommend_content_based() {
        let rec = create_test_dashboard().recommend(FixedIndex(1)).unwrap();
        assert_eq!(rec.name, "Hike");
        assert_eq!(rec.description, "outdoor trail walking nature");
        assert!(rec.score.is_some());
    }

    #[test]
    fn test_recommend_random_when_nothing_liked() {
        let mut workbook = Workbook::new();
        workbook.push_activity(ActivityRecord::new("Hike", "trail"));
        workbook.push_activity(ActivityRecord::new("Movie", "cinema"));
        workbook.push_log_entry(entry("Hike", 2, 1));

        let rec = Dashboard::new(Arc::new(workbook))
            .recommend(FixedIndex(1))
            .unwrap();
        assert_eq!(rec.name, "Movie");
        assert!(rec.score.is_none());
        assert!(rec.explanation.contains("random"));
    }

    #[test]
    fn test_recommend_empty_catalog() {
        let dashboard = Dashboard::new(Arc::new(Workbook::new()));
        assert_eq!(
            dashboard.recommend(FixedIndex(0)).unwrap_err(),
            RecommendError::EmptyCatalog
        );
    }

    fn assert_shareable<T: Clone + Send + Sync>() {}

    #[test]
    fn test_dashboard_is_shareable() {
        assert_shareable::<Dashboard>();
    }

    #[test]
    fn test_sample_dashboard() {
        let dashboard = Dashboard::sample();
        assert_eq!(dashboard.status().log_count, 1);
        assert_eq!(dashboard.activity_choices(), vec!["Test"]);
        assert_eq!(dashboard.recommend(FixedIndex(0)).unwrap().name, "Test");
    }
}
