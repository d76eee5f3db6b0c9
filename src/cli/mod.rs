//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

use crate::reading::{CF6_URL, HISTORY_URL};
use command::history::{parse_dated_id, DatedId};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Daily temperature records from airport history pages and CF6 reports
pub struct Cli {
    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Retries for a failed request before the date is written as MISSING
    #[arg(long, default_value_t = 3, global = true)]
    pub retries: u32,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape daily temperatures for an airport into a result file
    History {
        /// Airport code, e.g. KBOS
        airport: String,

        /// Record id and date pairs, e.g. ID7,03/04/2012
        #[arg(value_parser = parse_dated_id)]
        pairs: Vec<DatedId>,

        /// Directory the `result-*` file is created in
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Base of the daily history page URL
        #[arg(long, default_value = HISTORY_URL)]
        url: String,
    },
    /// Look up CF6 temperatures for MM/DD/YYYY dates read from stdin
    Cf6 {
        /// Weather forecast office, e.g. BOX
        wfo: String,

        /// Station id, e.g. BOS
        sid: String,

        /// CF6 report endpoint
        #[arg(long, default_value = CF6_URL)]
        url: String,
    },
}

/// Sends log output to stderr, WARN and above unless raised by `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}
