//! The core data type shared across all article sources.
//!
//! `Article` represents a single search hit.  Sources deserialize their native
//! payload straight into it, so the state machine and the UI never look at
//! the wire format.
//!
//! ## For contributors
//!
//! The Algolia payload is loose: `url`, `title` and `num_comments` can all be
//! `null`.  Those fields fall back to their defaults instead of failing the
//! whole response.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// A single search hit, immutable once received.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct Article {
    /// Unique identifier, used by dismissal.
    #[serde(rename = "objectID")]
    pub id: String,

    /// Link to the story.  Empty for text posts (Ask HN etc.).
    #[serde(rename = "url", default, deserialize_with = "null_as_default")]
    pub link: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,

    /// Comment count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_comments: u32,

    /// Score.
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: i64,

    /// Submission time, shown next to the title when present.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Host part of the link, e.g. `example.com` for
    /// `https://www.example.com/post/1`.  `None` for text posts.
    pub fn host(&self) -> Option<&str> {
        let rest = self.link.split_once("://").map_or(self.link.as_str(), |(_, r)| r);
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        let host = host.strip_prefix("www.").unwrap_or(host);
        (!host.is_empty()).then_some(host)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// An unparsable timestamp degrades to `None` rather than rejecting the hit.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

// ---------------------------------------------------------------------------
// Sort fields
// ---------------------------------------------------------------------------

/// A column the result list can be sorted by.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SortField {
    Author,
    /// Shown as "topic" in the UI.
    Title,
    /// `num_comments`.
    Comments,
    Points,
}

impl SortField {
    /// The column header this field sorts under.
    pub fn label(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Title => "topic",
            Self::Comments => "comments",
            Self::Points => "points",
        }
    }

    /// Ascending comparison of two articles on this field.
    pub fn compare(self, a: &Article, b: &Article) -> Ordering {
        match self {
            Self::Author => a.author.cmp(&b.author),
            Self::Title => a.title.cmp(&b.title),
            Self::Comments => a.num_comments.cmp(&b.num_comments),
            Self::Points => a.points.cmp(&b.points),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
