//! Command-line interface definitions.
//!
//! Flags override the matching keys of the YAML configuration file.

use clap::Parser;

/// Command-line arguments for the news list renderer.
///
/// # Examples
///
/// ```sh
/// # Render a saved feed response
/// newsfeed_rows --feed-file ./guardian.json
///
/// # Fetch two sections and export the rows as JSON
/// newsfeed_rows --api-key KEY -s world -s politics -j ./out
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "newsfeed_rows.yaml")]
    pub config: String,

    /// Read stories from a saved feed response instead of the network
    #[arg(short, long)]
    pub feed_file: Option<String>,

    /// Content API key
    #[arg(long, env = "GUARDIAN_API_KEY", default_value = "test")]
    pub api_key: String,

    /// Section to fetch (repeatable); overrides the config file
    #[arg(short, long = "section")]
    pub sections: Vec<String>,

    /// First list position shown in the viewport
    #[arg(long, default_value_t = 0)]
    pub scroll: usize,

    /// Number of visible rows; overrides the config file
    #[arg(long)]
    pub height: Option<usize>,

    /// Output directory for a JSON export of the visible rows
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}
