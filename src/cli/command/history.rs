//! Scrape daily temperature history for a list of dated ids.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Result;
use indicatif::ProgressBar;
use reqwest::Url;

use super::create_result_file;
use crate::{
    cli::create_progress_bar,
    download::Downloader,
    output::{OutputRow, RowWriter},
    reading::{history_url, parse_history, ClimateRecord, DateKey},
};

#[derive(Debug, Clone)]
/// An `id,MM/DD/YYYY` command line pair.
pub struct DatedId {
    pub id: String,
    pub date_text: String,
    pub date: DateKey,
}

pub fn parse_dated_id(s: &str) -> Result<DatedId, String> {
    let (id, date_text) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `id,MM/DD/YYYY`, got `{}`", s))?;
    // Parsed trimmed, echoed as given.
    let date = date_text.trim().parse::<DateKey>().map_err(|e| format!("{:#}", e))?;

    Ok(DatedId {
        id: id.to_string(),
        date_text: date_text.to_string(),
        date,
    })
}

/// Produces the extracted record for an airport on a given day.
pub trait HistorySource {
    async fn daily_record(&self, airport: &str, date: &DateKey) -> Result<ClimateRecord>;
}

/// Daily history pages fetched over HTTP.
pub struct HistoryPages<'a> {
    downloader: &'a Downloader,
    base_url: &'a str,
}

impl HistorySource for HistoryPages<'_> {
    async fn daily_record(&self, airport: &str, date: &DateKey) -> Result<ClimateRecord> {
        let url = Url::parse(&history_url(self.base_url, airport, date))?;
        let page = self.downloader.get_text(&url).await?;
        let record = parse_history(&page);

        if record.is_empty() {
            tracing::warn!("{} {}: no temperature table in {}", airport, date, url);
        } else {
            tracing::debug!("{} {}: {} values extracted", airport, date, record.len());
        }

        Ok(record)
    }
}

pub async fn history(
    downloader: &Downloader,
    airport: &str,
    pairs: &[DatedId],
    output_dir: &Path,
    base_url: &str,
) -> Result<PathBuf> {
    let source = HistoryPages {
        downloader,
        base_url,
    };
    let (file, path) = create_result_file(output_dir)?;
    let mut writer = RowWriter::new(file);

    let bar = create_progress_bar(pairs.len() as u64, format!("Fetching {} history...", airport));
    write_history_rows(&source, airport, pairs, &mut writer, &bar).await?;
    bar.finish_with_message(format!("{} history fetched", airport));

    writer.into_inner()?;

    Ok(path)
}

/// Writes one row per pair, in order. A failed lookup becomes a MISSING row.
pub async fn write_history_rows<S: HistorySource, W: Write>(
    source: &S,
    airport: &str,
    pairs: &[DatedId],
    writer: &mut RowWriter<W>,
    bar: &ProgressBar,
) -> Result<()> {
    for pair in pairs {
        let record = match source.daily_record(airport, &pair.date).await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!("{} {}: {:#}", pair.id, pair.date_text, err);
                ClimateRecord::default()
            }
        };

        writer.write_row(&OutputRow::history(&pair.id, &pair.date_text, &record))?;
        bar.inc(1);
    }

    Ok(())
}

// -- Tests -------------------------------------------------------------------
