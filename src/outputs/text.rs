//! Plain-text viewport rendering.
//!
//! The viewport shows `height` consecutive list positions starting at
//! `first`. Rows live in a [`RowPool`] owned by the caller, one slot per
//! screen line. Scrolling hands every slot back to the adapter for its new
//! position, so the same buffers are refilled instead of reallocated.

use crate::adapter::NewsAdapter;
use crate::models::NewsRow;
use std::fmt::Write;
use tracing::{debug, instrument};

/// Rows bound to screen slots, indexed by slot.
#[derive(Debug, Default)]
pub struct RowPool {
    slots: Vec<NewsRow>,
}

impl RowPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows ever allocated by this pool.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The first `count` slots.
    pub fn visible(&self, count: usize) -> &[NewsRow] {
        &self.slots[..count.min(self.slots.len())]
    }

    fn slot(&mut self, index: usize) -> &mut NewsRow {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, NewsRow::new);
        }
        &mut self.slots[index]
    }
}

/// Fill the pool for positions `first..first + height` and return how many
/// slots now hold a row. Positions past the end of the list are skipped.
#[instrument(level = "debug", skip(adapter, pool))]
pub fn bind_viewport(adapter: &NewsAdapter, first: usize, height: usize, pool: &mut RowPool) -> usize {
    let mut bound = 0;
    for index in 0..height {
        let position = first.saturating_add(index);
        if position >= adapter.len() {
            break;
        }
        if adapter.fill(position, pool.slot(index)) {
            bound += 1;
        }
    }
    debug!(bound, pooled = pool.capacity(), "Bound viewport");
    bound
}

/// Render the viewport as text, one block per visible story.
///
/// ```text
/// Election Results
///   Politics | J. Smith
///   Nov 5, 2019 02:30 PM
///   https://example.com/a
/// ```
pub fn render_viewport(adapter: &NewsAdapter, first: usize, height: usize, pool: &mut RowPool) -> String {
    let bound = bind_viewport(adapter, first, height, pool);
    format_rows(adapter, first, pool.visible(bound))
}

/// Format already-bound rows; `rows[i]` shows list position `first + i`.
pub fn format_rows(adapter: &NewsAdapter, first: usize, rows: &[NewsRow]) -> String {
    let mut out = String::new();

    for (index, row) in rows.iter().enumerate() {
        let url = adapter.url(first + index).unwrap_or_default();
        writeln!(out, "{}", row.title).unwrap();
        writeln!(out, "  {} | {}", row.section, row.author).unwrap();
        writeln!(out, "  {} {}", row.display_date, row.display_time).unwrap();
        writeln!(out, "  {}", url).unwrap();
    }

    if rows.is_empty() {
        out.push_str("(no stories)\n");
    }
    out
}
