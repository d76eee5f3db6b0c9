//! Look up CF6 temperatures for dates read from stdin.

use std::io::{self, Write};

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::{
    cache::{MonthlyCache, ReportSource},
    cli::create_spinner,
    download::Downloader,
    output::{OutputRow, RowWriter},
    reading::{cf6_url, DateKey, Station},
};

/// CF6 reports fetched over HTTP.
pub struct Cf6Reports<'a> {
    downloader: &'a Downloader,
    base_url: &'a str,
}

impl ReportSource for Cf6Reports<'_> {
    async fn monthly_report(&self, station: &Station, year: i32, month: u32) -> Result<String> {
        let url = cf6_url(self.base_url, station, year, month)?;
        self.downloader.get_text(&url).await
    }
}

pub async fn cf6(downloader: &Downloader, wfo: &str, sid: &str, base_url: &str) -> Result<()> {
    let source = Cf6Reports {
        downloader,
        base_url,
    };
    let mut cache = MonthlyCache::new(source, Station::new(wfo, sid));
    let mut writer = RowWriter::new(io::stdout());

    let spinner = create_spinner(format!("Reading CF6 reports for {} {}...", wfo, sid));
    let count = write_cf6_rows(&mut cache, BufReader::new(tokio::io::stdin()), &mut writer, &spinner).await?;
    spinner.finish_and_clear();

    writer.into_inner()?;
    tracing::info!("{} dates written", count);

    Ok(())
}

/// Writes one row per non-blank input line, in order. Returns the row count.
///
/// A malformed date stops the run. A failed lookup becomes a MISSING row.
pub async fn write_cf6_rows<S, R, W>(
    cache: &mut MonthlyCache<S>,
    input: R,
    writer: &mut RowWriter<W>,
    bar: &ProgressBar,
) -> Result<usize>
where
    S: ReportSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut count = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read dates")? {
        let date_text = line.trim();
        if date_text.is_empty() {
            continue;
        }
        let date: DateKey = date_text.parse()?;

        let day = match cache.lookup(&date).await {
            Ok(day) => day,
            Err(err) => {
                tracing::warn!("{}: {:#}", date_text, err);
                None
            }
        };

        writer.write_row(&OutputRow::cf6(date_text, day))?;
        bar.inc(1);
        count += 1;
    }

    Ok(count)
}

// -- Tests -------------------------------------------------------------------
