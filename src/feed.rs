//! Feed decoding and fetching.
//!
//! Stories come from a Guardian-style content API. A response looks like:
//!
//! ```text
//! { "response": { "results": [
//!     { "webTitle": "...", "sectionName": "...", "webPublicationDate": "...",
//!       "webUrl": "...", "fields": { "byline": "..." },
//!       "tags": [ { "type": "contributor", "webTitle": "..." } ] }
//! ] } }
//! ```
//!
//! Missing or `null` strings decode to empty strings. A record is never
//! rejected for its content; only a response that is not JSON of this shape
//! fails to decode.
//!
//! # Author Resolution
//!
//! 1. `fields.byline` when present and non-empty
//! 2. otherwise the first `contributor` tag's `webTitle`
//! 3. otherwise an empty string
//!
//! Only the first page of each section is fetched, and failures are not retried.

use crate::models::News;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Number of section requests in flight at once.
const PARALLEL_SECTIONS: usize = 4;

#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    response: FeedResponse,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    results: Vec<FeedResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedResult {
    web_title: Option<String>,
    section_name: Option<String>,
    web_publication_date: Option<String>,
    web_url: Option<String>,
    fields: Option<FeedFields>,
    #[serde(default)]
    tags: Vec<FeedTag>,
}

#[derive(Debug, Deserialize)]
struct FeedFields {
    byline: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedTag {
    #[serde(rename = "type")]
    kind: Option<String>,
    web_title: Option<String>,
}

impl FeedResult {
    fn author(&self) -> String {
        let byline = self
            .fields
            .as_ref()
            .and_then(|f| f.byline.as_deref())
            .filter(|b| !b.is_empty());
        let contributor = || {
            self.tags
                .iter()
                .find(|t| t.kind.as_deref() == Some("contributor"))
                .and_then(|t| t.web_title.as_deref())
        };
        byline.or_else(contributor).unwrap_or_default().to_string()
    }

    fn into_news(self) -> News {
        let author = self.author();
        News::new(
            self.web_title.unwrap_or_default(),
            author,
            self.section_name.unwrap_or_default(),
            self.web_publication_date.unwrap_or_default(),
            self.web_url.unwrap_or_default(),
        )
    }
}

/// Decode a feed response body into stories, in feed order.
///
/// # Errors
///
/// Returns an error if `body` is not JSON or lacks the `response` object.
pub fn decode_feed(body: &str) -> Result<Vec<News>, serde_json::Error> {
    let envelope: FeedEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .response
        .results
        .into_iter()
        .map(FeedResult::into_news)
        .collect())
}

/// Load a previously saved feed response from disk.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_file(path: impl AsRef<Path>) -> Result<Vec<News>, Box<dyn Error>> {
    let body = fs::read_to_string(path.as_ref()).await?;
    let stories = decode_feed(&body)?;
    info!(count = stories.len(), "Loaded stories from file");
    Ok(stories)
}

/// Request header carrying the API key. The key never goes into the URL.
const API_KEY_HEADER: &str = "api-key";

/// Build the request URL for one section (or the whole feed when `section` is `None`).
pub fn section_url(
    endpoint: &str,
    section: Option<&str>,
    page_size: u32,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(endpoint)?;
    {
        let mut query = url.query_pairs_mut();
        if let Some(section) = section {
            query.append_pair("section", section);
        }
        query
            .append_pair("show-fields", "byline")
            .append_pair("show-tags", "contributor")
            .append_pair("order-by", "newest")
            .append_pair("page-size", &page_size.to_string());
    }
    Ok(url)
}

/// Fetch the first page of one section.
#[instrument(level = "info", skip(client, api_key))]
pub async fn fetch_section(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    section: Option<&str>,
    page_size: u32,
) -> Result<Vec<News>, Box<dyn Error>> {
    let url = section_url(endpoint, section, page_size)?;
    let body = client
        .get(url)
        .header(API_KEY_HEADER, api_key)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(reqwest::Error::without_url)?
        .text()
        .await
        .map_err(reqwest::Error::without_url)?;
    let stories = match decode_feed(&body) {
        Ok(stories) => stories,
        Err(e) => {
            warn!(
                error = %e,
                response_preview = %truncate_for_log(&body, 300),
                "Feed returned non-conforming JSON"
            );
            return Err(e.into());
        }
    };
    debug!(count = stories.len(), "Decoded section");
    Ok(stories)
}

/// Fetch several sections concurrently and merge them.
///
/// Sections keep the order they were requested in. A section that fails is
/// logged and skipped. Stories that appear in more than one section are kept
/// once, at their first position. An empty `sections` list fetches the
/// unfiltered feed.
#[instrument(level = "info", skip(client, api_key))]
pub async fn fetch_sections(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    sections: &[String],
    page_size: u32,
) -> Vec<News> {
    let targets: Vec<Option<&str>> = if sections.is_empty() {
        vec![None]
    } else {
        sections.iter().map(|s| Some(s.as_str())).collect()
    };

    let batches: Vec<Vec<News>> = stream::iter(targets)
        .map(|section| async move {
            match fetch_section(client, endpoint, api_key, section, page_size).await {
                Ok(stories) => stories,
                Err(e) => {
                    error!(section = ?section, error = %e, "Section fetch failed; skipping");
                    Vec::new()
                }
            }
        })
        .buffered(PARALLEL_SECTIONS)
        .collect()
        .await;

    merge_batches(batches)
}

fn merge_batches(batches: Vec<Vec<News>>) -> Vec<News> {
    let total: usize = batches.iter().map(Vec::len).sum();
    let stories: Vec<News> = batches
        .into_iter()
        .flatten()
        .unique_by(|n| n.url().to_string())
        .collect();
    if stories.len() < total {
        warn!(dropped = total - stories.len(), "Dropped duplicate stories");
    }
    info!(count = stories.len(), "Merged feed");
    stories
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "response": {
            "status": "ok",
            "results": [
                {
                    "webTitle": "Election Results",
                    "sectionName": "Politics",
                    "webPublicationDate": "2019-11-05T14:30:00Z",
                    "webUrl": "https://example.com/a",
                    "fields": { "byline": "J. Smith" },
                    "tags": [ { "type": "contributor", "webTitle": "Someone Else" } ]
                },
                {
                    "webTitle": "Storm Warning",
                    "sectionName": "Weather",
                    "webPublicationDate": "2020-01-02T03:04:05Z",
                    "webUrl": "https://example.com/b",
                    "tags": [
                        { "type": "keyword", "webTitle": "Storms" },
                        { "type": "contributor", "webTitle": "A. Jones" }
                    ]
                },
                {
                    "webTitle": null,
                    "webUrl": "https://example.com/c"
                }
            ]
        }
    }"#;

    #[test]
    fn test_decode_feed_fields() {
        let stories = decode_feed(SAMPLE).unwrap();
        assert_eq!(stories.len(), 3);

        assert_eq!(stories[0].title(), "Election Results");
        assert_eq!(stories[0].author(), "J. Smith");
        assert_eq!(stories[0].section(), "Politics");
        assert_eq!(stories[0].web_publication_date(), "2019-11-05T14:30:00Z");
        assert_eq!(stories[0].url(), "https://example.com/a");

        assert_eq!(stories[1].author(), "A. Jones");
    }

    #[test]
    fn test_decode_feed_tolerates_missing_fields() {
        let stories = decode_feed(SAMPLE).unwrap();
        let sparse = &stories[2];
        assert_eq!(sparse.title(), "");
        assert_eq!(sparse.author(), "");
        assert_eq!(sparse.section(), "");
        assert_eq!(sparse.web_publication_date(), "");
        assert_eq!(sparse.url(), "https://example.com/c");
    }

    #[test]
    fn test_decode_feed_empty_results() {
        let stories = decode_feed(r#"{"response": {"status": "ok"}}"#).unwrap();
        assert!(stories.is_empty());
    }

    #[test]
    fn test_decode_feed_rejects_wrong_shape() {
        assert!(decode_feed("[]").is_err());
        assert!(decode_feed("not json").is_err());
    }

    #[test]
    fn test_section_url() {
        let url = section_url("https://content.example.com/search", Some("world"), 20).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("section".to_string(), "world".to_string())));
        assert!(pairs.contains(&("page-size".to_string(), "20".to_string())));
        assert!(pairs.iter().all(|(k, _)| k != "api-key"));

        let url = section_url("https://content.example.com/search", None, 10).unwrap();
        assert!(url.query_pairs().all(|(k, _)| k != "section"));

        assert!(section_url("not a url", None, 10).is_err());
    }

    #[tokio::test]
    async fn test_fetch_section_error_hides_api_key() {
        let client = reqwest::Client::new();
        let err = fetch_section(&client, "http://127.0.0.1:1/search", "SUPERSECRETKEY", Some("world"), 5)
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(!message.contains("SUPERSECRETKEY"), "key leaked: {message}");
    }

    #[test]
    fn test_merge_batches_drops_duplicates_in_order() {
        let a = News::new("A", "", "World", "", "https://example.com/a");
        let b = News::new("B", "", "World", "", "https://example.com/b");
        let a_again = News::new("A (politics)", "", "Politics", "", "https://example.com/a");

        let merged = merge_batches(vec![vec![a.clone(), b.clone()], vec![a_again]]);
        assert_eq!(merged, vec![a, b]);
    }

    #[tokio::test]
    async fn test_load_file() {
        let path = std::env::temp_dir().join(format!("newsfeed_rows_feed_{}.json", std::process::id()));
        tokio::fs::write(&path, SAMPLE).await.unwrap();
        let stories = load_file(&path).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;
        assert_eq!(stories.len(), 3);
    }
}
