//! Dashboard crate for the life-log workspace.
//!
//! This crate contains the service that turns a loaded workbook into the
//! dashboard views and the activity recommendation.

pub mod service;
pub mod views;

pub use service::{APP_VERSION, Dashboard, PROGRESS_TARGET_LOGS};
pub use views::{
    ActivityRecommendation, CalendarEvent, RadarPoint, RatingPoint, RestaurantProfile,
    SystemStatus,
};
