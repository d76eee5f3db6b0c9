//! CSV rows shared by both commands.

use std::io::Write;

use anyhow::{anyhow, Result};

use crate::reading::{Cf6Day, ClimateRecord, MISSING};

pub const MAX_ACTUAL: &str = "temperature.max.actual";
pub const MEAN_ACTUAL: &str = "temperature.mean.actual";

#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow(Vec<String>);

impl OutputRow {
    /// `(id, date, max, mean)` for a daily history lookup.
    pub fn history(id: &str, date: &str, record: &ClimateRecord) -> Self {
        let value = |key: &str| {
            record
                .get(key)
                .map_or_else(|| MISSING.to_string(), |v| v.to_string())
        };

        OutputRow(vec![
            id.to_string(),
            date.to_string(),
            value(MAX_ACTUAL),
            value(MEAN_ACTUAL),
        ])
    }

    /// `(date, max, avg)` for a CF6 lookup.
    pub fn cf6(date: &str, day: Option<&Cf6Day>) -> Self {
        let (max, avg) = match day {
            Some(day) => (day.max.clone(), day.avg.clone()),
            None => (MISSING.to_string(), MISSING.to_string()),
        };

        OutputRow(vec![date.to_string(), max, avg])
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

/// Writes rows as CSV, flushing after each one.
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RowWriter<W> {
    pub fn new(inner: W) -> Self {
        RowWriter {
            writer: csv::Writer::from_writer(inner),
        }
    }

    pub fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        self.writer.write_record(row.fields())?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| anyhow!("Failed to flush CSV output: {}", err.error()))
    }
}

// -- Tests -------------------------------------------------------------------
