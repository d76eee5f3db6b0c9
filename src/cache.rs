//! Per-run cache of CF6 days, filled one monthly report at a time.

use std::collections::{HashMap, HashSet};

use anyhow::Result;

use crate::reading::{parse_report, Cf6Day, DateKey, Station};

/// Anything that can produce the raw text of a monthly CF6 report.
pub trait ReportSource {
    async fn monthly_report(&self, station: &Station, year: i32, month: u32) -> Result<String>;
}

pub struct MonthlyCache<S> {
    source: S,
    station: Station,
    days: HashMap<DateKey, Cf6Day>,
    months: HashSet<(i32, u32)>,
}

impl<S: ReportSource> MonthlyCache<S> {
    pub fn new(source: S, station: Station) -> Self {
        MonthlyCache {
            source,
            station,
            days: HashMap::new(),
            months: HashSet::new(),
        }
    }

    /// Returns the day's record, fetching its month on the first miss.
    ///
    /// A month is fetched at most once per run once it has been retrieved;
    /// days its report doesn't cover stay `None`. A failed fetch leaves the
    /// month unmarked.
    pub async fn lookup(&mut self, date: &DateKey) -> Result<Option<&Cf6Day>> {
        if self.months.contains(&(date.year, date.month)) {
            tracing::debug!("cache hit for {}", date);
        } else {
            tracing::debug!("cache miss for {}, fetching {}-{:02}", date, date.year, date.month);
            let report = self
                .source
                .monthly_report(&self.station, date.year, date.month)
                .await?;
            let count = self.insert_report(date.year, date.month, &report);
            tracing::info!(
                "{} {}: {} days in report for {}-{:02}",
                self.station.wfo,
                self.station.sid,
                count,
                date.year,
                date.month
            );
        }

        Ok(self.days.get(date))
    }

    /// Parses a whole report into the cache, returning the days it held.
    pub fn insert_report(&mut self, year: i32, month: u32, report: &str) -> usize {
        let mut count = 0;

        for day in parse_report(report.lines()) {
            match DateKey::new(year, month, day.day) {
                Some(key) => {
                    self.days.insert(key, day);
                    count += 1;
                }
                None => tracing::debug!("skipping day {} outside {}-{:02}", day.day, year, month),
            }
        }
        self.months.insert((year, month));

        count
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }
}

// -- Tests -------------------------------------------------------------------
