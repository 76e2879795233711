use std::path::Path;

use csv::StringRecord;
use log::{debug, info};
use roadmend_geo::Attributes;
use serde_json::Value;

use crate::correct::{Endpoint, RoadRecord};
use crate::load::LoadError;

/// Column names of a road sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordColumns {
    pub name: String,
    pub start_north: String,
    pub start_east: String,
    pub end_north: String,
    pub end_east: String,
    /// Further columns read as cleaned numbers instead of text.
    pub numeric: Vec<String>,
}

impl Default for RecordColumns {
    fn default() -> Self {
        RecordColumns {
            name: "road_street_name".to_string(),
            start_north: "start_north".to_string(),
            start_east: "start_east".to_string(),
            end_north: "end_north".to_string(),
            end_east: "end_east".to_string(),
            numeric: vec!["distance(m)".to_string()],
        }
    }
}

/// Normalises a hand-typed number: spaces removed, comma read as a decimal
/// point, only the first point kept, and a leading point dropped.
///
/// ```rust
/// use roadmend::load::clean_numeric_string;
///
/// assert_eq!(clean_numeric_string(" 3,38 14 "), "3.3814");
/// assert_eq!(clean_numeric_string("3.38.14"), "3.3814");
/// assert_eq!(clean_numeric_string(".3.3814"), "33814");
/// ```
pub fn clean_numeric_string(raw: &str) -> String {
    let mut value = raw
        .trim()
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| if c == ',' { '.' } else { c })
        .collect::<String>();

    if let Some((first, rest)) = value
        .split_once('.')
        .filter(|(_, rest)| rest.contains('.'))
    {
        value = format!("{first}.{}", rest.replace('.', ""));
    }

    match value.strip_prefix('.') {
        Some(stripped) => stripped.to_string(),
        None => value,
    }
}

/// Cleans and parses a cell. Empty or unreadable cells are `NaN`.
pub fn clean_numeric(raw: &str) -> f64 {
    clean_numeric_string(raw).parse().unwrap_or(f64::NAN)
}

/// Reads road sheets into [`RoadRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct RoadRecordReader {
    pub columns: RecordColumns,
}

struct Positions {
    start_north: usize,
    start_east: usize,
    end_north: usize,
    end_east: usize,
}

impl RoadRecordReader {
    pub fn new(columns: RecordColumns) -> Self {
        RoadRecordReader { columns }
    }

    pub fn read_path(&self, path: &Path) -> Result<Vec<RoadRecord>, LoadError> {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|err| table_error(path, err))?;

        let records = self.read(reader, path)?;
        info!("Read {} road records from {path:?}", records.len());
        Ok(records)
    }

    /// Reads every row of `reader`. `origin` only labels errors.
    pub fn read<R: std::io::Read>(
        &self,
        mut reader: csv::Reader<R>,
        origin: &Path,
    ) -> Result<Vec<RoadRecord>, LoadError> {
        let headers = reader
            .headers()
            .map_err(|err| table_error(origin, err))?
            .clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: origin.to_path_buf(),
                    column: name.to_string(),
                })
        };

        let positions = Positions {
            start_north: column(&self.columns.start_north)?,
            start_east: column(&self.columns.start_east)?,
            end_north: column(&self.columns.end_north)?,
            end_east: column(&self.columns.end_east)?,
        };

        reader
            .records()
            .enumerate()
            .map(|(row, record)| {
                record
                    .map(|record| self.record(row, &headers, &record, &positions))
                    .map_err(|err| table_error(origin, err))
            })
            .collect()
    }

    fn record(
        &self,
        row: usize,
        headers: &StringRecord,
        record: &StringRecord,
        positions: &Positions,
    ) -> RoadRecord {
        let cell = |index: usize| clean_numeric(record.get(index).unwrap_or_default());

        let start = Endpoint::new(cell(positions.start_north), cell(positions.start_east));
        let end = Endpoint::new(cell(positions.end_north), cell(positions.end_east));

        let coordinates = [
            positions.start_north,
            positions.start_east,
            positions.end_north,
            positions.end_east,
        ];

        let attributes = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| !coordinates.contains(index))
            .map(|(index, header)| {
                let raw = record.get(index).unwrap_or_default();
                let value = if self.columns.numeric.iter().any(|c| c == header.trim()) {
                    Value::from(clean_numeric(raw))
                } else {
                    Value::from(raw.trim())
                };

                (header.trim().to_string(), value)
            })
            .collect::<Attributes>();

        if start.is_missing() || end.is_missing() {
            debug!("Row {row} has a missing or unreadable coordinate");
        }

        RoadRecord {
            row,
            start,
            end,
            attributes,
        }
    }
}

fn table_error(path: &Path, err: csv::Error) -> LoadError {
    LoadError::Table {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
