//! JSON export of materialized rows.
//!
//! Writes the rows currently on screen to `{json_output_dir}/rows.json`,
//! each paired with the URL its position is bound to.

use crate::models::NewsRow;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// One exported row.
#[derive(Debug, Serialize)]
pub struct ExportedRow<'a> {
    pub position: usize,
    #[serde(flatten)]
    pub row: &'a NewsRow,
    pub url: &'a str,
}

/// Write `rows` as a JSON array to `{json_output_dir}/rows.json`.
///
/// Creates the directory when missing and returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_rows(
    rows: &[ExportedRow<'_>],
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(rows)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(json_output_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join("rows.json");
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = rows.len(), "Wrote rows JSON");
    Ok(path)
}
