use std::ops::Range;

use chrono::{Local, NaiveDateTime};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Format of `created`. Lexicographic order on it is chronological order.
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Range new links are drawn from.
pub const LINK_RANGE: Range<u32> = 10..1_000_000;

/// Length of the date prefix of `created` (`YYYY-MM-DD`).
const DAY_LEN: usize = 10;

/// One news record as it lives in the backing file.
///
/// `title` and `text` are whatever the submitter sent, including nothing at
/// all. `link` is kept as text on disk; see [`NewsItem::link_id`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    title: Option<String>,
    text: Option<String>,
    created: String,
    #[serde(deserialize_with = "link_from_text_or_number")]
    link: String,
}

impl NewsItem {
    pub fn new(
        title: Option<&str>,
        text: Option<&str>,
        created: NaiveDateTime,
        link: u32,
    ) -> NewsItem {
        NewsItem {
            title: title.map(str::to_string),
            text: text.map(str::to_string),
            created: created.format(CREATED_FORMAT).to_string(),
            link: link.to_string(),
        }
    }

    /// Stamps a new item with the current local time and a random link.
    ///
    /// Links are not checked for uniqueness here; two items may share one.
    pub fn fresh(title: Option<&str>, text: Option<&str>) -> NewsItem {
        let link = rand::thread_rng().gen_range(LINK_RANGE);
        NewsItem::new(title, text, Local::now().naive_local(), link)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// The link read as a number, or `None` if it is not one.
    pub fn link_id(&self) -> Option<u64> {
        parse_id(&self.link)
    }

    /// Calendar date part of `created`.
    ///
    /// A malformed `created` shorter than a date is returned whole.
    pub fn day(&self) -> &str {
        self.created.get(..DAY_LEN).unwrap_or(&self.created)
    }

    /// Case-sensitive title filter. The empty query matches everything,
    /// including items without a title.
    pub fn title_contains(&self, query: &str) -> bool {
        query.is_empty() || self.title().map_or(false, |title| title.contains(query))
    }
}

/// Reads an identifier made of ASCII digits only. Signs, whitespace and
/// anything else are rejected.
pub fn parse_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLink {
    Text(String),
    Number(u64),
}

// Hand-edited news files carry numeric links.
fn link_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawLink::deserialize(deserializer)? {
        RawLink::Text(text) => text,
        RawLink::Number(number) => number.to_string(),
    })
}
