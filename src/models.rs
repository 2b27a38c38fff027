//! Data models for news stories and their list-row projections.
//!
//! This module defines the two value types the rest of the crate moves around:
//! - [`News`]: One story exactly as the feed delivered it
//! - [`NewsRow`]: The display-ready projection of a story, recycled by the
//!   rendering layer between screen positions
//!
//! `News` is immutable once built. `NewsRow` is a plain mutable buffer; the
//! adapter overwrites it in place whenever a row is handed back for reuse.

use serde::{Deserialize, Serialize};

/// A single news story as delivered by the feed.
///
/// The five fields are stored verbatim. Nothing is trimmed, validated or
/// normalized here; a malformed publication timestamp is only noticed when a
/// row is materialized from the story.
///
/// # Fields
///
/// * `title` - Headline of the story (may be empty)
/// * `author` - Byline (may be empty)
/// * `section` - Category label, e.g. "Politics"
/// * `web_publication_date` - Raw ISO-8601 timestamp, e.g. `2019-11-05T14:30:00Z`
/// * `url` - Link to the full story, opaque to this crate
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct News {
    title: String,
    author: String,
    section: String,
    web_publication_date: String,
    url: String,
}

impl News {
    /// Build a story from its five raw fields.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        section: impl Into<String>,
        web_publication_date: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            section: section.into(),
            web_publication_date: web_publication_date.into(),
            url: url.into(),
        }
    }

    /// The headline of the story.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The byline of the story.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The section (category) the story was filed under.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// The raw publication timestamp, exactly as received.
    pub fn web_publication_date(&self) -> &str {
        &self.web_publication_date
    }

    /// The URL of the full story.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A display-ready list row.
///
/// `title`, `author` and `section` are copied from the [`News`] it was built
/// from; `display_date` and `display_time` come from the timestamp
/// normalizer. The URL is intentionally absent: the rendering layer binds it
/// to a click action by position, see [`crate::adapter::NewsAdapter::url`].
///
/// A fresh row has every field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsRow {
    pub title: String,
    pub author: String,
    pub section: String,
    pub display_date: String,
    pub display_time: String,
}

impl NewsRow {
    /// An empty row, ready to be filled.
    pub fn new() -> Self {
        Self::default()
    }
}
