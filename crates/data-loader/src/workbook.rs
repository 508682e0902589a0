//! Workbook loading.
//!
//! Turns a directory of worksheet exports into a `Workbook`, and provides the
//! built-in sample workbook used when the backend cannot be read.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use chrono::Local;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

impl Workbook {
    /// Load every worksheet export found in `data_dir`
    ///
    /// Steps:
    /// 1. Parse the four worksheets in parallel
    /// 2. Assemble the workbook
    /// 3. Warn about diary entries that point at unknown activities
    ///
    /// `Film.csv` is optional; the other three files must exist.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading worksheets from {:?}", data_dir);

        let activities_path = data_dir.join(parser::ACTIVITIES_FILE);
        let diary_path = data_dir.join(parser::DIARY_FILE);
        let films_path = data_dir.join(parser::FILMS_FILE);
        let restaurants_path = data_dir.join(parser::RESTAURANTS_FILE);

        // Nested joins give four-way parallelism
        let ((activities, diary), (films, restaurants)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_activities(&activities_path),
                    || parser::parse_diary(&diary_path),
                )
            },
            || {
                rayon::join(
                    || optional_sheet(parser::parse_films(&films_path)),
                    || parser::parse_restaurants(&restaurants_path),
                )
            },
        );

        let workbook = Workbook::from_parts(activities?, diary?, films?, restaurants?);

        let (n_activities, n_diary, n_films, n_restaurants) = workbook.counts();
        info!(
            "Loaded {} activities, {} diary entries, {} films, {} restaurants",
            n_activities, n_diary, n_films, n_restaurants
        );

        let dangling = workbook.dangling_log_entries();
        if dangling > 0 {
            warn!(
                "{} diary entries reference activities missing from the catalog",
                dangling
            );
        }

        Ok(workbook)
    }

    /// Load from `data_dir`, falling back to `Workbook::sample()` on any error
    pub fn load_or_sample(data_dir: &Path) -> Self {
        match Self::load_from_dir(data_dir) {
            Ok(workbook) => workbook,
            Err(e) => {
                warn!("Could not load worksheets ({}), using sample data", e);
                Self::sample()
            }
        }
    }

    /// A tiny workbook with one row per sheet (no films)
    pub fn sample() -> Self {
        let activities = vec![ActivityRecord {
            name: "Test".to_string(),
            description: "Test".to_string(),
            energy_level: 3,
            budget: 0.0,
            location: "Home".to_string(),
        }];

        let diary = vec![LogEntry {
            date: Local::now().naive_local(),
            activity_name: "Test".to_string(),
            rating: 5,
            notes: "OK".to_string(),
            photo_ref: None,
        }];

        let restaurants = vec![RestaurantReview {
            name: "Test".to_string(),
            location: "Trieste".to_string(),
            cuisine: "Pizza".to_string(),
            location_score: 8.0,
            menu_score: 8.0,
            service_score: 8.0,
            cost_score: 8.0,
            total: 8.0,
            review: "Test".to_string(),
        }];

        Workbook::from_parts(activities, diary, Vec::new(), restaurants)
    }

    /// Number of diary entries whose activity is not in the catalog.
    ///
    /// Diary names are soft references, so this is informational only.
    pub fn dangling_log_entries(&self) -> usize {
        let known: HashSet<&str> = self.activities.iter().map(|a| a.name.as_str()).collect();
        self.diary
            .iter()
            .filter(|e| !known.contains(e.activity_name.as_str()))
            .count()
    }
}

/// A missing optional sheet loads as empty; any other failure still counts.
fn optional_sheet<T>(result: Result<Vec<T>>) -> Result<Vec<T>> {
    match result {
        Err(DataLoadError::FileNotFound { .. }) => Ok(Vec::new()),
        other => other,
    }
}
