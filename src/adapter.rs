//! Row materialization for a scrolling list of stories.
//!
//! A rendering layer asks for one row per visible position and hands back rows
//! that scrolled off screen so they can be refilled instead of reallocated.
//! This module fills those rows.
//!
//! # Recycling
//!
//! - [`materialize`] takes the story and an optional row by value and returns
//!   the row. A recycled row keeps its string buffers; every field is cleared
//!   and rewritten.
//! - [`materialize_into`] fills a row the caller keeps borrowed, for pools
//!   that never give up ownership of their slots.
//!
//! The adapter never owns a pool. Which row goes back to which position is up
//! to the caller, and a single row must not be filled from two threads at once.
//!
//! # Malformed timestamps
//!
//! A timestamp that fails to normalize never aborts the row. What ends up in
//! `display_date`/`display_time` is decided by [`MalformedFallback`].

use crate::models::{News, NewsRow};
use crate::timestamp::{TimestampPolicy, normalize_with};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// What a row shows when its story's timestamp cannot be normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedFallback {
    /// Empty date and time, on fresh and recycled rows alike.
    #[default]
    Clear,
    /// Leave whatever a recycled row already showed. Fresh rows stay empty.
    KeepPrevious,
}

/// Formatting choices applied to every row an adapter produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RowFormat {
    #[serde(default)]
    pub timestamp_policy: TimestampPolicy,
    #[serde(default)]
    pub on_malformed: MalformedFallback,
}

/// Build a row for `story` with the default [`RowFormat`].
///
/// Passing `Some(row)` recycles that row; `None` allocates a new one.
///
/// # Examples
///
/// ```
/// use newsfeed_rows::adapter::materialize;
/// use newsfeed_rows::models::News;
///
/// let story = News::new("Election Results", "J. Smith", "Politics", "2019-11-05T14:30:00Z", "https://example.com/a");
/// let row = materialize(&story, None);
/// assert_eq!(row.display_date, "Nov 5, 2019");
/// assert_eq!(row.display_time, "02:30 PM");
/// ```
pub fn materialize(story: &News, reusable: Option<NewsRow>) -> NewsRow {
    materialize_with(story, reusable, RowFormat::default())
}

/// Build a row for `story` with an explicit [`RowFormat`].
pub fn materialize_with(story: &News, reusable: Option<NewsRow>, format: RowFormat) -> NewsRow {
    let mut row = reusable.unwrap_or_default();
    materialize_into(story, &mut row, format);
    row
}

/// Overwrite `row` with the projection of `story`.
///
/// A row that was never filled is indistinguishable from a fresh one, so the
/// `KeepPrevious` fallback leaves it empty.
#[instrument(level = "trace", skip_all, fields(title = %story.title()))]
pub fn materialize_into(story: &News, row: &mut NewsRow, format: RowFormat) {
    overwrite(&mut row.title, story.title());
    overwrite(&mut row.author, story.author());
    overwrite(&mut row.section, story.section());

    match normalize_with(story.web_publication_date(), format.timestamp_policy) {
        Ok(stamp) => {
            overwrite(&mut row.display_date, &stamp.date);
            overwrite(&mut row.display_time, &stamp.time);
        }
        Err(e) => {
            debug!(error = %e, url = %story.url(), "Unusable publication timestamp; using fallback");
            if format.on_malformed == MalformedFallback::Clear {
                row.display_date.clear();
                row.display_time.clear();
            }
        }
    }
}

fn overwrite(field: &mut String, value: &str) {
    field.clear();
    field.push_str(value);
}

/// An ordered list of stories that produces rows by position.
///
/// Insertion order is feed order. The list is replaced wholesale on refresh;
/// individual stories are never edited.
#[derive(Debug, Clone, Default)]
pub struct NewsAdapter {
    stories: Vec<News>,
    format: RowFormat,
}

impl NewsAdapter {
    /// Create an adapter over `stories` using `format` for every row.
    pub fn new(stories: Vec<News>, format: RowFormat) -> Self {
        let adapter = Self { stories, format };
        adapter.report_malformed();
        adapter
    }

    /// Number of stories whose timestamp fails to normalize under this
    /// adapter's policy.
    pub fn malformed_count(&self) -> usize {
        self.stories
            .iter()
            .filter(|s| normalize_with(s.web_publication_date(), self.format.timestamp_policy).is_err())
            .count()
    }

    /// Warn once per list, not once per redraw.
    fn report_malformed(&self) {
        let malformed = self.malformed_count();
        if malformed > 0 {
            warn!(
                malformed,
                total = self.stories.len(),
                "Stories with unusable publication timestamps; their rows use the fallback"
            );
        }
    }

    /// Number of stories in the list.
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn format(&self) -> RowFormat {
        self.format
    }

    /// The story at `position`, if any.
    pub fn item(&self, position: usize) -> Option<&News> {
        self.stories.get(position)
    }

    /// The URL a click on the row at `position` should open.
    pub fn url(&self, position: usize) -> Option<&str> {
        self.item(position).map(News::url)
    }

    /// All stories in feed order.
    pub fn stories(&self) -> &[News] {
        &self.stories
    }

    /// The row for `position`, recycling `reusable` when given.
    ///
    /// Returns `None` for a position past the end of the list. The reusable
    /// row is dropped in that case.
    pub fn row(&self, position: usize, reusable: Option<NewsRow>) -> Option<NewsRow> {
        let story = self.item(position)?;
        Some(materialize_with(story, reusable, self.format))
    }

    /// Fill a borrowed row for `position`. Returns `false`, leaving the row
    /// untouched, when the position is out of range.
    pub fn fill(&self, position: usize, row: &mut NewsRow) -> bool {
        match self.item(position) {
            Some(story) => {
                materialize_into(story, row, self.format);
                true
            }
            None => false,
        }
    }

    /// Swap in a freshly fetched list, releasing the old stories.
    pub fn replace(&mut self, stories: Vec<News>) -> Vec<News> {
        debug!(old = self.stories.len(), new = stories.len(), "Replacing story list");
        let old = std::mem::replace(&mut self.stories, stories);
        self.report_malformed();
        old
    }
}
