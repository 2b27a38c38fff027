//! # Newsfeed Rows
//!
//! Turns the stories of a news feed into display-ready list rows.
//!
//! ## Pipeline
//!
//! 1. **Feed**: decode (or fetch) a list of [`models::News`] in feed order
//! 2. **Adapter**: for each visible position, fill a [`models::NewsRow`],
//!    recycling rows the rendering layer hands back
//! 3. **Timestamp**: each row's publication timestamp becomes a separate
//!    date and time string, independent of host locale and timezone
//! 4. **Outputs**: print the viewport, optionally export it as JSON
//!
//! ## Example
//!
//! ```
//! use newsfeed_rows::adapter::{NewsAdapter, RowFormat};
//! use newsfeed_rows::models::News;
//!
//! let adapter = NewsAdapter::new(
//!     vec![News::new("Election Results", "J. Smith", "Politics", "2019-11-05T14:30:00Z", "https://example.com/a")],
//!     RowFormat::default(),
//! );
//! let row = adapter.row(0, None).unwrap();
//! assert_eq!((row.display_date.as_str(), row.display_time.as_str()), ("Nov 5, 2019", "02:30 PM"));
//! ```

pub mod adapter;
pub mod config;
pub mod feed;
pub mod models;
pub mod outputs;
pub mod timestamp;
pub mod utils;
