//! Holiday registry with id-based CRUD and CSV import.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::{Result, RotationError};
use crate::models::{Holiday, HolidayCalendar};

/// Expected CSV header.
pub const CSV_HEADER: &str = "start_date,end_date,name";

/// A stored holiday with its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub id: u64,
    #[serde(flatten)]
    pub holiday: Holiday,
}

/// In-memory holiday store.
///
/// Ids are assigned sequentially from 1 and never reused.
#[derive(Debug, Clone, Default)]
pub struct HolidayRegistry {
    entries: BTreeMap<u64, Holiday>,
    next_id: u64,
}

impl HolidayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Stores a holiday and returns its id.
    pub fn create(&mut self, holiday: Holiday) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.entries.insert(id, holiday);
        id
    }

    /// Stores several holidays, returning their ids in input order.
    pub fn bulk_create(&mut self, holidays: impl IntoIterator<Item = Holiday>) -> Vec<u64> {
        holidays.into_iter().map(|h| self.create(h)).collect()
    }

    /// Looks up a holiday.
    pub fn get(&self, id: u64) -> Option<&Holiday> {
        self.entries.get(&id)
    }

    /// Replaces a stored holiday.
    pub fn update(&mut self, id: u64, holiday: Holiday) -> Result<()> {
        let slot = self
            .entries
            .get_mut(&id)
            .ok_or(RotationError::HolidayNotFound(id))?;
        *slot = holiday;
        Ok(())
    }

    /// Removes a holiday.
    pub fn delete(&mut self, id: u64) -> Result<Holiday> {
        self.entries
            .remove(&id)
            .ok_or(RotationError::HolidayNotFound(id))
    }

    /// All entries in id order.
    pub fn entries(&self) -> Vec<HolidayEntry> {
        self.entries
            .iter()
            .map(|(&id, h)| HolidayEntry {
                id,
                holiday: h.clone(),
            })
            .collect()
    }

    /// Number of stored holidays.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Holidays whose *start* date lies in `[start, end]`.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<HolidayEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.holiday.start_date() >= start && e.holiday.start_date() <= end)
            .collect()
    }

    /// Holidays starting in the given year.
    pub fn in_year(&self, year: i32) -> Vec<HolidayEntry> {
        match (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) {
            (Some(start), Some(end)) => self.in_range(start, end),
            _ => Vec::new(),
        }
    }

    /// Holidays overlapping `[start, end]` anywhere, including periods that
    /// began earlier.
    pub fn overlapping(&self, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
        self.entries
            .values()
            .filter(|h| h.overlaps(start, end))
            .cloned()
            .collect()
    }

    /// All holidays in id order.
    pub fn holidays(&self) -> Vec<Holiday> {
        self.entries.values().cloned().collect()
    }

    /// Calendar view over every stored holiday.
    pub fn calendar(&self, long_period_days: u32) -> HolidayCalendar {
        HolidayCalendar::new(self.holidays()).with_long_period_days(long_period_days)
    }

    /// Imports holidays from CSV.
    ///
    /// The header must be `start_date,end_date,name`. Fields follow RFC 4180
    /// quoting and are trimmed. Dates are ISO `YYYY-MM-DD`; `end_date` and
    /// `name` may be empty. Blank lines are skipped. Nothing is stored unless
    /// every row parses.
    ///
    /// # Errors
    /// [`RotationError::Csv`] with the 1-based line number of the first bad
    /// row, or [`RotationError::Io`].
    pub fn import_csv(&mut self, reader: impl Read) -> Result<Vec<u64>> {
        let holidays = parse_csv(reader)?;
        let ids = self.bulk_create(holidays);
        info!(count = ids.len(), "imported holidays");
        Ok(ids)
    }

    /// Imports a CSV file.
    pub fn import_csv_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<u64>> {
        let file = std::fs::File::open(path)?;
        self.import_csv(file)
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    name: Option<String>,
}

fn parse_csv(reader: impl Read) -> Result<Vec<Holiday>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(|e| csv_error(e, 1))?.clone();
    if headers.is_empty() {
        return Err(RotationError::Csv {
            line: 1,
            reason: "missing header".into(),
        });
    }
    if headers.iter().collect::<Vec<_>>().join(",") != CSV_HEADER {
        return Err(RotationError::Csv {
            line: line_of(headers.position(), 1),
            reason: format!("expected header '{CSV_HEADER}'"),
        });
    }

    let mut holidays = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut last_line = line_of(headers.position(), 1);
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(csv_error(e, last_line + 1)),
        }
        let line = line_of(record.position(), last_line + 1);
        last_line = line;

        let row: CsvRow = record
            .deserialize(Some(&headers))
            .map_err(|e| csv_error(e, line))?;
        let holiday = Holiday::new(row.start_date, row.end_date, row.name)
            .map_err(|e| RotationError::Csv {
                line,
                reason: e.to_string(),
            })?;
        holidays.push(holiday);
    }
    Ok(holidays)
}

fn line_of(position: Option<&csv::Position>, fallback: usize) -> usize {
    position.map_or(fallback, |p| p.line() as usize)
}

fn csv_error(err: csv::Error, fallback_line: usize) -> RotationError {
    let line = line_of(err.position(), fallback_line);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => RotationError::Io(e),
        csv::ErrorKind::Deserialize { err, .. } => RotationError::Csv {
            line,
            reason: err.to_string(),
        },
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => RotationError::Csv {
            line,
            reason: format!("expected {expected_len} fields, found {len}"),
        },
        _ => RotationError::Csv { line, reason },
    }
}
