//! View models returned by the dashboard.
//!
//! These are plain data for a front end to draw; nothing here renders.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Sidebar status block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub log_count: usize,
    /// Share of the diary goal reached, in 0.0..=1.0
    pub progress: f64,
}

/// One point of the rating-over-time chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingPoint {
    pub date: NaiveDateTime,
    pub rating: i32,
    pub activity: String,
}

/// Calendar entry for one diary row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub axis: &'static str,
    pub value: f64,
}

/// A restaurant review shaped for a radar chart.
///
/// `radar` is a closed polygon: the first axis is repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantProfile {
    pub name: String,
    pub location: String,
    pub cuisine: String,
    pub total: f64,
    pub review: String,
    pub radar: Vec<RadarPoint>,
}

/// Owned recommendation ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecommendation {
    pub name: String,
    pub description: String,
    pub location: String,
    pub energy_level: i32,
    pub budget: f64,
    /// Human-readable account of how the pick was made
    pub explanation: String,
    /// Cosine score when the pick came from the profile, `None` for random picks
    pub score: Option<f64>,
}
