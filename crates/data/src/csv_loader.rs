use crate::models::{PriceBar, PriceSeries};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Counts from one ingestion pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Data rows read (header excluded)
    pub rows_read: u64,
    /// Rows that made it into the series
    pub rows_kept: u64,
    /// Rows dropped because `close` was missing or non-numeric
    pub dropped_close: u64,
    /// Rows dropped because the volume was missing or non-numeric
    /// (only counted when `close` parsed)
    pub dropped_volume: u64,
    /// Kept rows sharing a date with the previous row
    pub duplicate_dates: u64,
}

impl IngestReport {
    #[must_use]
    pub const fn rows_dropped(&self) -> u64 {
        self.dropped_close + self.dropped_volume
    }

    /// Formats a summary line.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Read: {}, Kept: {}, Dropped: {} (close: {}, volume: {}), Duplicate dates: {}",
            self.rows_read,
            self.rows_kept,
            self.rows_dropped(),
            self.dropped_close,
            self.dropped_volume,
            self.duplicate_dates
        )
    }
}

/// Reads a daily price CSV into a [`PriceSeries`].
///
/// Only three columns are used, located by header name: the date, the
/// closing price and the USD volume. Every other column is ignored.
///
/// Rows whose close or volume is empty or non-numeric are dropped and
/// counted; they never reach the returned series. A row whose date cannot be
/// parsed is an error, since the input is expected to be a well-formed daily
/// file.
#[derive(Debug, Clone)]
pub struct CsvPriceLoader {
    date_column: String,
    close_column: String,
    volume_column: String,
}

impl Default for CsvPriceLoader {
    fn default() -> Self {
        Self::new("date", "close", "Volume USD")
    }
}

struct ColumnIndex {
    date: usize,
    close: usize,
    volume: usize,
}

impl CsvPriceLoader {
    #[must_use]
    pub fn new(date_column: &str, close_column: &str, volume_column: &str) -> Self {
        Self {
            date_column: date_column.to_string(),
            close_column: close_column.to_string(),
            volume_column: volume_column.to_string(),
        }
    }

    /// Loads and cleans the price file at `path`.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened, a required column is
    /// missing, a CSV record is malformed, or a date cannot be parsed.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(PriceSeries, IngestReport)> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open price file: {}", path.display()))?;

        let (series, report) = self
            .read_from(file)
            .with_context(|| format!("Failed to read price file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            rows = series.len(),
            "Loaded price series"
        );

        Ok((series, report))
    }

    /// Same as [`CsvPriceLoader::load`] for any reader.
    ///
    /// # Errors
    /// Returns error if a required column is missing, a CSV record is
    /// malformed, or a date cannot be parsed.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<(PriceSeries, IngestReport)> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns = self.resolve_columns(reader.headers()?)?;
        let mut report = IngestReport::default();
        let mut bars = Vec::new();

        for (index, result) in reader.records().enumerate() {
            // Line 1 is the header
            let line = index + 2;
            let record = result.with_context(|| format!("Malformed CSV record at line {line}"))?;
            report.rows_read += 1;

            let raw_date = record.get(columns.date).unwrap_or_default();
            let date = parse_date(raw_date)
                .ok_or_else(|| anyhow!("Invalid date '{raw_date}' at line {line}"))?;

            let raw_close = record.get(columns.close).unwrap_or_default();
            let Some(close) = parse_numeric(raw_close) else {
                tracing::debug!(line, value = raw_close, "Dropping row: non-numeric close");
                report.dropped_close += 1;
                continue;
            };

            let raw_volume = record.get(columns.volume).unwrap_or_default();
            let Some(volume_usd) = parse_numeric(raw_volume) else {
                tracing::debug!(line, value = raw_volume, "Dropping row: non-numeric volume");
                report.dropped_volume += 1;
                continue;
            };

            bars.push(PriceBar::new(date, close, volume_usd));
        }

        let series = PriceSeries::from_bars(bars);
        report.rows_kept = series.len() as u64;
        report.duplicate_dates = series.duplicate_dates() as u64;

        if report.rows_dropped() > 0 {
            tracing::warn!(
                dropped = report.rows_dropped(),
                dropped_close = report.dropped_close,
                dropped_volume = report.dropped_volume,
                "Dropped rows with non-numeric price or volume"
            );
        }
        if report.duplicate_dates > 0 {
            tracing::warn!(
                duplicates = report.duplicate_dates,
                "Price series contains duplicate dates"
            );
        }

        Ok((series, report))
    }

    fn resolve_columns(&self, headers: &StringRecord) -> Result<ColumnIndex> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| anyhow!("Missing required column '{name}'"))
        };

        Ok(ColumnIndex {
            date: find(&self.date_column)?,
            close: find(&self.close_column)?,
            volume: find(&self.volume_column)?,
        })
    }
}

/// Parses a decimal field, accepting plain and scientific notation.
///
/// Empty, non-numeric and out-of-range values yield `None`. That includes
/// `inf` and magnitudes beyond what `Decimal` holds (about 7.9e28), so such
/// rows are dropped rather than carried as non-finite prices.
fn parse_numeric(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Parses the calendar date out of the formats daily exports commonly use.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}
