//! Daily history page scraping.

use std::{iter, sync::OnceLock};

use scraper::{ElementRef, Html, Selector};

use super::{ClimateRecord, ClimateValue, DateKey};

pub const HISTORY_URL: &str = "http://www.wunderground.com/history/airport";

const COLUMNS: [&str; 3] = ["actual", "average", "record"];

/// Maps a row heading on the page to its record key prefix.
fn metric_key(heading: &str) -> Option<&'static str> {
    match heading.trim() {
        "Mean Temperature" => Some("temperature.mean"),
        "Max Temperature" => Some("temperature.max"),
        "Min Temperature" => Some("temperature.min"),
        _ => None,
    }
}

fn cell_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("table#historyTable td").expect("valid selector"))
}

pub fn history_url(base: &str, airport: &str, date: &DateKey) -> String {
    format!(
        "{}/{}/{}/{}/{}/DailyHistory.html",
        base.trim_end_matches('/'),
        airport,
        date.year,
        date.month,
        date.day
    )
}

/// Extracts the temperature rows of the history table.
///
/// Each recognised row yields `<metric>.actual`, `<metric>.average` and
/// `<metric>.record`; the record column is missing when the page only has
/// two values.
pub fn parse_history(page: &str) -> ClimateRecord {
    let document = Html::parse_document(page);
    let mut record = ClimateRecord::default();

    for cell in document.select(cell_selector()) {
        let Some(label) = child_elements(cell, "span").next() else {
            continue;
        };
        let Some(metric) = metric_key(&label.text().collect::<String>()) else {
            continue;
        };
        let Some(row) = cell.parent().and_then(ElementRef::wrap) else {
            continue;
        };

        let values = row_values(row).chain(iter::once(ClimateValue::Missing));
        for (column, value) in COLUMNS.iter().zip(values) {
            record.insert(format!("{}.{}", metric, column), value);
        }
    }

    record
}

// Values sit two spans deep in the row's cells: `td > span > span`.
fn row_values(row: ElementRef<'_>) -> impl Iterator<Item = ClimateValue> + '_ {
    child_elements(row, "td")
        .flat_map(|td| child_elements(td, "span"))
        .flat_map(|span| child_elements(span, "span"))
        .map(|value| ClimateValue::parse(&value.text().collect::<String>()))
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == name)
}

// -- Tests -------------------------------------------------------------------
