//! # Newsfeed Rows
//!
//! Command-line rendering layer: loads stories from a saved feed response or
//! the content API, prints the visible part of the list and optionally
//! exports those rows as JSON.
//!
//! ## Usage
//!
//! ```sh
//! newsfeed_rows --feed-file ./guardian.json --scroll 10 --height 5
//! ```

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;
use newsfeed_rows::adapter::NewsAdapter;
use newsfeed_rows::config::Config;
use newsfeed_rows::feed;
use newsfeed_rows::outputs::json::{self, ExportedRow};
use newsfeed_rows::outputs::text::{self, RowPool};
use newsfeed_rows::utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsfeed_rows starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.feed_file, ?args.sections, "Parsed CLI arguments");

    let mut config = Config::load(&args.config).await?;
    if !args.sections.is_empty() {
        config.sections = args.sections.clone();
    }
    if let Some(height) = args.height {
        config.viewport_height = height;
    }

    // Early check: ensure JSON output dir is writable
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Load stories ----
    let stories = match &args.feed_file {
        Some(path) => feed::load_file(path).await?,
        None => {
            let client = reqwest::Client::new();
            feed::fetch_sections(
                &client,
                &config.endpoint,
                &args.api_key,
                &config.sections,
                config.page_size,
            )
            .await
        }
    };
    info!(count = stories.len(), "Stories ready");

    // ---- Render ----
    let adapter = NewsAdapter::new(stories, config.row_format);
    let mut pool = RowPool::new();
    let bound = text::bind_viewport(&adapter, args.scroll, config.viewport_height, &mut pool);
    print!("{}", text::format_rows(&adapter, args.scroll, pool.visible(bound)));

    // ---- JSON export ----
    if let Some(dir) = &args.json_output_dir {
        let rows: Vec<ExportedRow<'_>> = pool
            .visible(bound)
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let position = args.scroll + index;
                ExportedRow {
                    position,
                    row,
                    url: adapter.url(position).unwrap_or_default(),
                }
            })
            .collect();
        if let Err(e) = json::write_rows(&rows, dir).await {
            error!(error = %e, "Failed to write rows JSON");
            return Err(e);
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}
