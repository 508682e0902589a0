//! Parsers for the worksheet CSV exports.
//!
//! Each worksheet is exported with a header row using the column names of the
//! backend spreadsheet:
//! - Attivita.csv: Attivita, Descrizione, Energia, Budget, Luogo
//! - Diario.csv: Data, Attivita, Voto, Note, Foto
//! - Locali.csv: Nome, Luogo, Tipo, Voto_Location, Voto_Menu, Voto_Servizio,
//!   Voto_Conto, Totale, Recensione
//! - Film.csv: any columns
//!
//! Rows are read into loosely typed `*Row` structs first (every cell is an
//! optional string) and then converted, so a blank cell and a malformed cell
//! can be told apart and reported with the line they came from.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

pub const ACTIVITIES_FILE: &str = "Attivita.csv";
pub const DIARY_FILE: &str = "Diario.csv";
pub const FILMS_FILE: &str = "Film.csv";
pub const RESTAURANTS_FILE: &str = "Locali.csv";

#[derive(Debug, Deserialize)]
struct ActivityRow {
    #[serde(rename = "Attivita")]
    name: String,
    #[serde(rename = "Descrizione", default)]
    description: Option<String>,
    #[serde(rename = "Energia", default)]
    energy: Option<String>,
    #[serde(rename = "Budget", default)]
    budget: Option<String>,
    #[serde(rename = "Luogo", default)]
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiaryRow {
    #[serde(rename = "Data", default)]
    date: String,
    #[serde(rename = "Attivita")]
    activity: String,
    #[serde(rename = "Voto", default)]
    rating: String,
    #[serde(rename = "Note", default)]
    notes: Option<String>,
    #[serde(rename = "Foto", default)]
    photo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RestaurantRow {
    #[serde(rename = "Nome")]
    name: String,
    #[serde(rename = "Luogo", default)]
    location: Option<String>,
    #[serde(rename = "Tipo", default)]
    cuisine: Option<String>,
    #[serde(rename = "Voto_Location", default)]
    location_score: Option<String>,
    #[serde(rename = "Voto_Menu", default)]
    menu_score: Option<String>,
    #[serde(rename = "Voto_Servizio", default)]
    service_score: Option<String>,
    #[serde(rename = "Voto_Conto", default)]
    cost_score: Option<String>,
    #[serde(rename = "Totale", default)]
    total: Option<String>,
    #[serde(rename = "Recensione", default)]
    review: Option<String>,
}

/// Location of a cell, used to build error messages
#[derive(Clone, Copy)]
struct Cell<'a> {
    file: &'a str,
    line: u64,
    field: &'a str,
}

impl Cell<'_> {
    fn invalid(&self, value: &str) -> DataLoadError {
        DataLoadError::InvalidValue {
            file: self.file.to_string(),
            line: self.line,
            field: self.field.to_string(),
            value: value.to_string(),
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let label = file_label(path);
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DataLoadError::csv(&label, e))
}

/// Read every data row of a worksheet and hand it to `convert` with its line.
///
/// `convert` returns `Ok(None)` to drop a row without failing the sheet.
fn read_rows<R, T, F>(path: &Path, mut convert: F) -> Result<Vec<T>>
where
    R: for<'de> Deserialize<'de>,
    F: FnMut(R, &str, u64) -> Result<Option<T>>,
{
    let label = file_label(path);
    let mut reader = open_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| DataLoadError::csv(&label, e))?
        .clone();

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DataLoadError::csv(&label, e))?;
        // Spreadsheet exports often end with fully blank rows
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: R = record
            .deserialize(Some(&headers))
            .map_err(|e| DataLoadError::csv(&label, e))?;
        if let Some(item) = convert(row, &label, line)? {
            out.push(item);
        }
    }
    Ok(out)
}

/// Parse the activity catalog
pub fn parse_activities(path: &Path) -> Result<Vec<ActivityRecord>> {
    read_rows(path, |row: ActivityRow, file, line| {
        let cell = |field| Cell { file, line, field };
        Ok(Some(ActivityRecord {
            name: row.name,
            description: row.description.unwrap_or_default(),
            energy_level: parse_integer(row.energy.as_deref(), cell("Energia"))?.unwrap_or(0),
            budget: parse_number(row.budget.as_deref(), cell("Budget"))?.unwrap_or(0.0),
            location: row.location.unwrap_or_default(),
        }))
    })
}

/// Parse the diary (interaction log)
///
/// A row without a usable `Data` or `Voto` is skipped with a warning. The
/// rest of the diary still loads, so one unrated entry never costs the
/// whole workbook.
pub fn parse_diary(path: &Path) -> Result<Vec<LogEntry>> {
    read_rows(path, |row: DiaryRow, file, line| {
        let Some(date) = parse_timestamp(&row.date) else {
            warn!("Skipping {} line {}: unreadable date {:?}", file, line, row.date);
            return Ok(None);
        };
        let cell = Cell { file, line, field: "Voto" };
        let rating = match parse_integer(Some(row.rating.as_str()), cell) {
            Ok(Some(rating)) => rating,
            Ok(None) | Err(_) => {
                warn!("Skipping {} line {}: no usable rating {:?}", file, line, row.rating);
                return Ok(None);
            }
        };

        Ok(Some(LogEntry {
            date,
            activity_name: row.activity,
            rating,
            notes: row.notes.unwrap_or_default(),
            photo_ref: row.photo.filter(|p| !p.is_empty()),
        }))
    })
}

/// Parse the restaurant reviews
pub fn parse_restaurants(path: &Path) -> Result<Vec<RestaurantReview>> {
    read_rows(path, |row: RestaurantRow, file, line| {
        let score = |raw: Option<&str>, field| -> Result<f64> {
            Ok(parse_number(raw, Cell { file, line, field })?.unwrap_or(0.0))
        };
        Ok(Some(RestaurantReview {
            location_score: score(row.location_score.as_deref(), "Voto_Location")?,
            menu_score: score(row.menu_score.as_deref(), "Voto_Menu")?,
            service_score: score(row.service_score.as_deref(), "Voto_Servizio")?,
            cost_score: score(row.cost_score.as_deref(), "Voto_Conto")?,
            total: score(row.total.as_deref(), "Totale")?,
            name: row.name,
            location: row.location.unwrap_or_default(),
            cuisine: row.cuisine.unwrap_or_default(),
            review: row.review.unwrap_or_default(),
        }))
    })
}

/// Parse the film sheet as raw column/value maps
pub fn parse_films(path: &Path) -> Result<Vec<FilmRecord>> {
    read_rows(path, |row: FilmRecord, _file, _line| Ok(Some(row)))
}

/// Parse an integer cell.
///
/// Blank cells give `Ok(None)`. Spreadsheet exports write whole numbers in
/// float columns as "3.0", which is accepted as 3.
fn parse_integer(raw: Option<&str>, cell: Cell<'_>) -> Result<Option<i32>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    if let Ok(value) = raw.parse::<i32>() {
        return Ok(Some(value));
    }
    match raw.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.abs() <= i32::MAX as f64 => {
            Ok(Some(value as i32))
        }
        _ => Err(cell.invalid(raw)),
    }
}

fn parse_number(raw: Option<&str>, cell: Cell<'_>) -> Result<Option<f64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| cell.invalid(raw)),
    }
}

/// Parse a diary date.
///
/// Example: "2024-05-01" -> 2024-05-01 00:00:00
///          "2024-05-01 18:30:00" -> 2024-05-01 18:30:00
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    let raw = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
