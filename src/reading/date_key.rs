//! Calendar date keys parsed from `MM/DD/YYYY` strings.

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Context, Error, Result};
use chrono::{Datelike, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// A validated `(year, month, day)` triple.
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    /// Returns `None` unless the triple is a real calendar date.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DateKey::from)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y")
            .with_context(|| format!("invalid date `{}`, expected MM/DD/YYYY", s))?;

        Ok(date.into())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.month, self.day, self.year)
    }
}

/// Last calendar day of the given month.
pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| anyhow!("no such month {}-{:02}", year, month))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_parse_date() {
        let date: DateKey = "03/04/2012".parse().unwrap();

        assert_eq!(date.year, 2012);
        assert_eq!(date.month, 3);
        assert_eq!(date.day, 4);
    }

    #[test]
    fn should_accept_unpadded_fields() {
        let date: DateKey = "3/4/2012".parse().unwrap();

        assert_eq!(date, DateKey::new(2012, 3, 4).unwrap());
    }

    #[test]
    fn should_round_trip_dates() {
        for text in ["01/01/1999", "02/29/2012", "12/31/2020", "07/15/1950"] {
            let date: DateKey = text.parse().unwrap();
            assert_eq!(date.to_string(), text);
            assert_eq!(date.to_string().parse::<DateKey>().unwrap(), date);
        }
    }

    #[test]
    fn should_reject_invalid_dates() {
        assert!("02/30/2012".parse::<DateKey>().is_err());
        assert!("02/29/2013".parse::<DateKey>().is_err());
        assert!("13/01/2012".parse::<DateKey>().is_err());
        assert!("2012-03-04".parse::<DateKey>().is_err());
        assert!("".parse::<DateKey>().is_err());
    }

    #[test]
    fn should_find_last_day_of_month() {
        assert_eq!(
            last_day_of_month(2012, 2).unwrap(),
            NaiveDate::from_ymd_opt(2012, 2, 29).unwrap()
        );
        assert_eq!(
            last_day_of_month(2011, 12).unwrap(),
            NaiveDate::from_ymd_opt(2011, 12, 31).unwrap()
        );
        assert!(last_day_of_month(2011, 13).is_err());
    }
}
