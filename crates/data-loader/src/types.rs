//! Core domain types for the life-log worksheets.
//!
//! The backend spreadsheet has one worksheet per record kind. Each kind gets
//! a plain struct with public fields; `Workbook` holds all of them together
//! in the order the rows appeared in the sheet.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Activity catalog
// =============================================================================

/// One row of the activity catalog (`Attivita` worksheet).
///
/// `name` is expected to be unique, but nothing enforces it. The catalog is
/// an ordered list and consumers that care about uniqueness must dedupe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub name: String,
    /// Free text used for similarity scoring. Empty when the cell was blank.
    pub description: String,
    pub energy_level: i32,
    pub budget: f64,
    pub location: String,
}

impl ActivityRecord {
    /// Build a record with only the fields that matter for recommendation.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            energy_level: 0,
            budget: 0.0,
            location: String::new(),
        }
    }
}

// =============================================================================
// Diary
// =============================================================================

/// One row of the interaction log (`Diario` worksheet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: NaiveDateTime,
    /// Soft reference to `ActivityRecord::name`; may point at nothing.
    pub activity_name: String,
    /// Rating on the 1-5 scale the diary uses
    pub rating: i32,
    pub notes: String,
    pub photo_ref: Option<String>,
}

// =============================================================================
// Restaurants
// =============================================================================

/// One row of the restaurant reviews (`Locali` worksheet).
///
/// Scores are on a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantReview {
    pub name: String,
    pub location: String,
    pub cuisine: String,
    pub location_score: f64,
    pub menu_score: f64,
    pub service_score: f64,
    pub cost_score: f64,
    pub total: f64,
    pub review: String,
}

// =============================================================================
// Films
// =============================================================================

/// A row of the `Film` worksheet, kept as raw column/value pairs.
///
/// No view reads films yet, so the sheet has no fixed schema here.
pub type FilmRecord = BTreeMap<String, String>;

// =============================================================================
// Workbook
// =============================================================================

/// All worksheets of the backend, loaded together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub(crate) activities: Vec<ActivityRecord>,
    pub(crate) diary: Vec<LogEntry>,
    pub(crate) films: Vec<FilmRecord>,
    pub(crate) restaurants: Vec<RestaurantReview>,
}

impl Workbook {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a workbook from already-loaded sheets
    pub fn from_parts(
        activities: Vec<ActivityRecord>,
        diary: Vec<LogEntry>,
        films: Vec<FilmRecord>,
        restaurants: Vec<RestaurantReview>,
    ) -> Self {
        Self {
            activities,
            diary,
            films,
            restaurants,
        }
    }

    pub fn activities(&self) -> &[ActivityRecord] {
        &self.activities
    }

    pub fn diary(&self) -> &[LogEntry] {
        &self.diary
    }

    pub fn films(&self) -> &[FilmRecord] {
        &self.films
    }

    pub fn restaurants(&self) -> &[RestaurantReview] {
        &self.restaurants
    }

    /// Find the first activity with the given name
    pub fn get_activity(&self, name: &str) -> Option<&ActivityRecord> {
        self.activities.iter().find(|a| a.name == name)
    }

    pub fn push_activity(&mut self, activity: ActivityRecord) {
        self.activities.push(activity);
    }

    pub fn push_log_entry(&mut self, entry: LogEntry) {
        self.diary.push(entry);
    }

    pub fn push_restaurant(&mut self, review: RestaurantReview) {
        self.restaurants.push(review);
    }

    /// Row counts as (activities, diary, films, restaurants)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.activities.len(),
            self.diary.len(),
            self.films.len(),
            self.restaurants.len(),
        )
    }
}
