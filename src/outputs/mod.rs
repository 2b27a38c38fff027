//! Rendering-layer outputs for materialized rows.
//!
//! # Submodules
//!
//! - [`text`]: Owns the row pool and prints the visible part of the list
//! - [`json`]: Writes the visible rows to a JSON file
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── rows.json
//! ```

pub mod json;
pub mod text;
