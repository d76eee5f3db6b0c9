//! Named climate values extracted from a source page.

use std::{collections::BTreeMap, fmt};

/// Literal written wherever a value could not be extracted.
pub const MISSING: &str = "MISSING";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClimateValue {
    Number(f64),
    Missing,
}

impl ClimateValue {
    /// Parses a cell's text; anything that isn't a number counts as missing.
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse::<f64>()
            .map(ClimateValue::Number)
            .unwrap_or(ClimateValue::Missing)
    }
}

impl fmt::Display for ClimateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the trailing `.0` on whole numbers.
            ClimateValue::Number(v) => write!(f, "{:?}", v),
            ClimateValue::Missing => f.write_str(MISSING),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Flat mapping of dotted field names (`temperature.max.actual`) to values.
pub struct ClimateRecord {
    values: BTreeMap<String, ClimateValue>,
}

impl ClimateRecord {
    pub fn insert(&mut self, key: impl Into<String>, value: ClimateValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<ClimateValue> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ClimateValue)> for ClimateRecord {
    fn from_iter<I: IntoIterator<Item = (K, ClimateValue)>>(iter: I) -> Self {
        let mut record = ClimateRecord::default();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
