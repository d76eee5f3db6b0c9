pub mod cf6;
pub mod history;

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::Builder;

pub use cf6::cf6;
pub use history::history;

/// Creates a new `result-<random>` file in `dir` that outlives the run,
/// returning its absolute path.
pub fn create_result_file(dir: &Path) -> Result<(File, PathBuf)> {
    let file = Builder::new()
        .prefix("result-")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create result file in `{}`", dir.display()))?;

    let (file, path) = file
        .keep()
        .map_err(|err| err.error)
        .context("Failed to keep result file")?;
    let path = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve `{}`", path.display()))?;

    Ok((file, path))
}

// -- Tests -------------------------------------------------------------------
