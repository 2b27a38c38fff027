//! Publication timestamp normalization.
//!
//! Feeds publish timestamps such as `2019-11-05T14:30:00Z`. A list row shows
//! them as two separate strings, a date (`Nov 5, 2019`) and a time
//! (`02:30 PM`). This module does that conversion.
//!
//! # Policies
//!
//! | Policy | Behavior |
//! |--------|----------|
//! | [`TimestampPolicy::ParseAndReformat`] | Parse as a real instant, reformat with a fixed English locale in the offset carried by the timestamp |
//! | [`TimestampPolicy::SplitOnSeparator`] | Cut the raw text at the first `T`; no calendar interpretation at all |
//!
//! `ParseAndReformat` is the default. `SplitOnSeparator` exists for feeds whose
//! timestamps cannot be parsed but are still worth showing; it is chosen once
//! per adapter and never used as an automatic fallback for a failed parse.
//!
//! # Determinism
//!
//! Output never depends on the host timezone or locale. The parsed offset is
//! kept and used for formatting, and chrono's formatter only knows English
//! month names and `AM`/`PM` markers.

use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Pattern every timestamp must match after the UTC designator is rewritten.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Date display format, e.g. "Mar 3, 1984".
const DATE_FORMAT: &str = "%b %-d, %Y";

/// Time display format, e.g. "04:30 PM".
const TIME_FORMAT: &str = "%I:%M %p";

/// The character splitting date from time in the raw text.
const TIME_SEPARATOR: char = 'T';

/// Offset written in place of a trailing `Z`.
const UTC_OFFSET: &str = "+0000";

static TRAILING_UTC_DESIGNATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"Z$").unwrap());

/// How raw timestamps are turned into display strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Parse the timestamp and reformat it.
    #[default]
    ParseAndReformat,
    /// Split the raw text at the first `T` and show both halves as-is.
    SplitOnSeparator,
}

/// A normalized `(date, time)` display pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStamp {
    pub date: String,
    pub time: String,
}

/// Classification of [`TimestampError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedTimestamp,
}

/// A timestamp could not be normalized.
///
/// This is always recoverable: callers degrade to a fallback display value
/// and keep rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The raw value does not match the expected pattern.
    MalformedTimestamp {
        /// The timestamp as received.
        raw: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl TimestampError {
    fn malformed(raw: &str, reason: impl Into<String>) -> Self {
        TimestampError::MalformedTimestamp {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TimestampError::MalformedTimestamp { .. } => ErrorKind::MalformedTimestamp,
        }
    }
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::MalformedTimestamp { raw, reason } => {
                write!(f, "malformed timestamp {raw:?}: {reason}")
            }
        }
    }
}

impl Error for TimestampError {}

/// Rewrite a trailing `Z` as `+0000`.
///
/// Only the final character is considered. A `Z` anywhere else is left
/// alone, and a timestamp that already carries a numeric offset comes back
/// borrowed and unchanged.
///
/// # Examples
///
/// ```
/// use newsfeed_rows::timestamp::substitute_utc_designator;
///
/// assert_eq!(substitute_utc_designator("2020-01-02T03:04:05Z"), "2020-01-02T03:04:05+0000");
/// assert_eq!(substitute_utc_designator("2020-01-02T03:04:05+0100"), "2020-01-02T03:04:05+0100");
/// ```
pub fn substitute_utc_designator(raw: &str) -> Cow<'_, str> {
    TRAILING_UTC_DESIGNATOR.replace(raw, UTC_OFFSET)
}

/// Normalize a raw timestamp with the default policy.
///
/// # Errors
///
/// Returns [`TimestampError::MalformedTimestamp`] for empty input, a missing
/// offset, non-numeric fields or an impossible calendar value.
///
/// # Examples
///
/// ```
/// use newsfeed_rows::timestamp::normalize;
///
/// let stamp = normalize("2019-11-05T14:30:00Z").unwrap();
/// assert_eq!(stamp.date, "Nov 5, 2019");
/// assert_eq!(stamp.time, "02:30 PM");
/// ```
pub fn normalize(raw: &str) -> Result<DisplayStamp, TimestampError> {
    normalize_with(raw, TimestampPolicy::default())
}

/// Normalize a raw timestamp with an explicit policy.
pub fn normalize_with(raw: &str, policy: TimestampPolicy) -> Result<DisplayStamp, TimestampError> {
    match policy {
        TimestampPolicy::ParseAndReformat => parse_and_reformat(raw),
        TimestampPolicy::SplitOnSeparator => split_on_separator(raw),
    }
}

fn parse_and_reformat(raw: &str) -> Result<DisplayStamp, TimestampError> {
    if raw.is_empty() {
        return Err(TimestampError::malformed(raw, "empty timestamp"));
    }

    let with_offset = substitute_utc_designator(raw);
    let parsed = DateTime::parse_from_str(&with_offset, PARSE_FORMAT)
        .map_err(|e| TimestampError::malformed(raw, e.to_string()))?;

    Ok(DisplayStamp {
        date: parsed.format(DATE_FORMAT).to_string(),
        time: parsed.format(TIME_FORMAT).to_string(),
    })
}

fn split_on_separator(raw: &str) -> Result<DisplayStamp, TimestampError> {
    let (date, time) = raw
        .split_once(TIME_SEPARATOR)
        .ok_or_else(|| TimestampError::malformed(raw, "no date/time separator"))?;
    let time = time.strip_suffix('Z').unwrap_or(time);

    if date.is_empty() || time.is_empty() {
        return Err(TimestampError::malformed(raw, "empty date or time part"));
    }

    Ok(DisplayStamp {
        date: date.to_string(),
        time: time.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_malformed(result: Result<DisplayStamp, TimestampError>) {
        match result {
            Err(e) => assert_eq!(e.kind(), ErrorKind::MalformedTimestamp),
            Ok(stamp) => panic!("expected MalformedTimestamp, got {stamp:?}"),
        }
    }

    #[test]
    fn test_normalize_utc_afternoon() {
        let stamp = normalize("2019-11-05T14:30:00Z").unwrap();
        assert_eq!(stamp.date, "Nov 5, 2019");
        assert_eq!(stamp.time, "02:30 PM");
    }

    #[test]
    fn test_normalize_morning_and_midnight() {
        let stamp = normalize("1984-03-03T09:05:59Z").unwrap();
        assert_eq!(stamp.date, "Mar 3, 1984");
        assert_eq!(stamp.time, "09:05 AM");

        let stamp = normalize("2021-12-31T00:00:00Z").unwrap();
        assert_eq!(stamp.date, "Dec 31, 2021");
        assert_eq!(stamp.time, "12:00 AM");
    }

    #[test]
    fn test_normalize_z_and_numeric_utc_agree() {
        assert_eq!(
            normalize("2020-01-02T03:04:05Z").unwrap(),
            normalize("2020-01-02T03:04:05+0000").unwrap()
        );
    }

    #[test]
    fn test_normalize_keeps_embedded_offset() {
        // 23:30 at +0200 is still Jan 2 in the timestamp's own zone.
        let stamp = normalize("2020-01-02T23:30:00+0200").unwrap();
        assert_eq!(stamp.date, "Jan 2, 2020");
        assert_eq!(stamp.time, "11:30 PM");

        let stamp = normalize("2020-01-02T01:15:00-0500").unwrap();
        assert_eq!(stamp.date, "Jan 2, 2020");
        assert_eq!(stamp.time, "01:15 AM");
    }

    #[test]
    fn test_normalize_malformed_inputs() {
        assert_malformed(normalize(""));
        assert_malformed(normalize("not-a-date"));
        assert_malformed(normalize("garbage"));
        // missing offset
        assert_malformed(normalize("2019-11-05T14:30:00"));
        // non-numeric field
        assert_malformed(normalize("2019-11-xxT14:30:00Z"));
        // impossible calendar date
        assert_malformed(normalize("2019-02-30T14:30:00Z"));
        // lowercase designator is not rewritten
        assert_malformed(normalize("2019-11-05T14:30:00z"));
    }

    #[test]
    fn test_malformed_error_carries_raw_value() {
        let err = normalize("garbage").unwrap_err();
        let TimestampError::MalformedTimestamp { raw, .. } = &err;
        assert_eq!(raw, "garbage");
        assert!(err.to_string().contains("\"garbage\""));
    }

    #[test]
    fn test_substitute_only_trailing_z() {
        assert_eq!(
            substitute_utc_designator("2020-01-02T03:04:05Z"),
            "2020-01-02T03:04:05+0000"
        );
        assert_eq!(
            substitute_utc_designator("Zulu 2020Z"),
            "Zulu 2020+0000"
        );
        assert_eq!(
            substitute_utc_designator("2020-01-02TZ3:04:05+0000"),
            "2020-01-02TZ3:04:05+0000"
        );
        assert_eq!(substitute_utc_designator("ZZ"), "Z+0000");
    }

    #[test]
    fn test_substitute_is_noop_for_numeric_offset() {
        let raw = "2020-01-02T03:04:05+0100";
        let out = substitute_utc_designator(raw);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, raw);
    }

    #[test]
    fn test_embedded_z_is_not_corrupted() {
        assert_malformed(normalize("2020-01-02TZ3:04:05+0000"));
    }

    #[test]
    fn test_split_policy() {
        let stamp =
            normalize_with("2019-11-05T14:30:00Z", TimestampPolicy::SplitOnSeparator).unwrap();
        assert_eq!(stamp.date, "2019-11-05");
        assert_eq!(stamp.time, "14:30:00");

        let stamp =
            normalize_with("2019-11-05T14:30:00+0100", TimestampPolicy::SplitOnSeparator).unwrap();
        assert_eq!(stamp.time, "14:30:00+0100");
    }

    #[test]
    fn test_split_policy_malformed() {
        assert_malformed(normalize_with("", TimestampPolicy::SplitOnSeparator));
        assert_malformed(normalize_with("garbage", TimestampPolicy::SplitOnSeparator));
        assert_malformed(normalize_with("T14:30:00Z", TimestampPolicy::SplitOnSeparator));
        assert_malformed(normalize_with("2019-11-05TZ", TimestampPolicy::SplitOnSeparator));
    }

    #[test]
    fn test_policy_deserialization() {
        let policy: TimestampPolicy = serde_yaml::from_str("split_on_separator").unwrap();
        assert_eq!(policy, TimestampPolicy::SplitOnSeparator);
        let policy: TimestampPolicy = serde_yaml::from_str("parse_and_reformat").unwrap();
        assert_eq!(policy, TimestampPolicy::ParseAndReformat);
    }
}
