//! # Data Loader Crate
//!
//! This crate loads the life-log worksheets exported from the backend
//! spreadsheet.
//!
//! ## Main Components
//!
//! - **types**: Domain records (ActivityRecord, LogEntry, RestaurantReview) and the Workbook
//! - **parser**: Parse the CSV worksheet exports into those records
//! - **workbook**: Load a whole directory of exports, or fall back to sample data
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Workbook;
//! use std::path::Path;
//!
//! let workbook = Workbook::load_from_dir(Path::new("data/sheets"))?;
//!
//! for entry in workbook.diary() {
//!     println!("{} rated {}", entry.activity_name, entry.rating);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod workbook;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{ActivityRecord, FilmRecord, LogEntry, RestaurantReview, Workbook};
