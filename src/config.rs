//! YAML configuration.
//!
//! Every key is optional; a missing file yields [`Config::default`].
//!
//! ```yaml
//! endpoint: https://content.guardianapis.com/search
//! sections: [world, politics]
//! page_size: 20
//! viewport_height: 10
//! row_format:
//!   timestamp_policy: parse_and_reformat   # or split_on_separator
//!   on_malformed: clear                    # or keep_previous
//! ```

use crate::adapter::RowFormat;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

pub const DEFAULT_ENDPOINT: &str = "https://content.guardianapis.com/search";

/// Runtime configuration for fetching and rendering the list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Content API search endpoint.
    pub endpoint: String,
    /// Sections to fetch. Empty means the unfiltered feed.
    pub sections: Vec<String>,
    /// Stories requested per section.
    pub page_size: u32,
    /// Number of rows visible at once.
    pub viewport_height: usize,
    pub row_format: RowFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            sections: Vec::new(),
            page_size: 20,
            viewport_height: 10,
            row_format: RowFormat::default(),
        }
    }
}

impl Config {
    /// Parse a configuration document.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Load the configuration at `path`, falling back to defaults when the
    /// file does not exist. A file that exists but does not parse is an error.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        if !fs::try_exists(path).await? {
            warn!("Config file not found; using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!(?config, "Loaded configuration");
        Ok(config)
    }
}
