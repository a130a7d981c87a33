//! Read-side views over the news collection: the day-grouped feed and
//! lookup by link.

use crate::model::NewsItem;

/// News items sharing one calendar date, most recent first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayBucket {
    date: String,
    items: Vec<NewsItem>,
}

impl DayBucket {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }
}

/// Sorts `news` newest first, splits it into days and keeps only items whose
/// title contains `query`. Days left without items are dropped.
///
/// The sort is stable, so items with identical `created` keep file order.
pub fn group_by_day(mut news: Vec<NewsItem>, query: &str) -> Vec<DayBucket> {
    news.sort_by(|a, b| b.created().cmp(a.created()));

    // Items of one day are contiguous once sorted.
    let mut days: Vec<DayBucket> = Vec::new();
    for item in news {
        match days.last_mut() {
            Some(bucket) if bucket.date == item.day() => bucket.items.push(item),
            _ => days.push(DayBucket {
                date: item.day().to_string(),
                items: vec![item],
            }),
        }
    }

    days.into_iter()
        .filter_map(|mut bucket| {
            bucket.items.retain(|item| item.title_contains(query));
            if bucket.items.is_empty() {
                None
            } else {
                Some(bucket)
            }
        })
        .collect()
}

/// First item whose link equals `id`. Links are not unique, so later
/// duplicates are shadowed.
pub fn find_by_link(news: &[NewsItem], id: u64) -> Option<&NewsItem> {
    news.iter().find(|item| item.link_id() == Some(id))
}
