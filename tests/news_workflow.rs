use std::fs;

use chrono::NaiveDateTime;
use tempfile::TempDir;

use hypernews::database::NewsStore;
use hypernews::error::NewsError;
use hypernews::feed::group_by_day;
use hypernews::model::{NewsItem, CREATED_FORMAT};

const SEED: &str = r#"[
    {"title": "A", "text": "x", "created": "2024-01-01 10:00:00", "link": "1"},
    {"title": "B", "text": "y", "created": "2024-01-02 10:00:00", "link": "2"}
]"#;

fn seeded_store() -> (TempDir, NewsStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("news.json");
    fs::write(&path, SEED).expect("seed");
    (dir, NewsStore::new(path))
}

#[test]
fn unfiltered_listing_has_one_day_per_item() {
    let (_dir, store) = seeded_store();
    let days = group_by_day(store.load().expect("load"), "");

    let dates: Vec<&str> = days.iter().map(|day| day.date()).collect();
    assert_eq!(dates, vec!["2024-01-02", "2024-01-01"]);
    assert!(days.iter().all(|day| day.items().len() == 1));
}

#[test]
fn filtered_listing_keeps_only_matching_day() {
    let (_dir, store) = seeded_store();
    let days = group_by_day(store.load().expect("load"), "A");

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].date(), "2024-01-01");
    assert_eq!(days[0].items()[0].title(), Some("A"));
}

#[test]
fn created_item_is_listed_found_and_well_formed() {
    let (_dir, store) = seeded_store();
    let item = store.create(Some("Hi"), Some("there")).expect("create");

    let link: u64 = item.link().parse().expect("numeric link");
    assert!((10..1_000_000).contains(&link));
    assert!(NaiveDateTime::parse_from_str(item.created(), CREATED_FORMAT).is_ok());

    let news = store.load().expect("load");
    assert_eq!(news.len(), 3);
    assert_eq!(news.last(), Some(&item));
    assert_eq!(store.find(link).expect("find"), item);

    let days = group_by_day(news, "Hi");
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].date(), item.day());
    assert_eq!(days[0].items(), &[item][..]);
}

#[test]
fn seeded_ids_resolve_and_unknown_ids_do_not() {
    let (_dir, store) = seeded_store();
    assert_eq!(store.find(2).expect("find").title(), Some("B"));
    match store.find(999_999_999) {
        Err(NewsError::NotFound(999_999_999)) => {}
        other => panic!("expected not found, got {:?}", other),
    }
}

#[test]
fn append_and_save_writes_a_plain_json_array() {
    let (dir, store) = seeded_store();
    store
        .append_and_save(NewsItem::fresh(None, Some("no title")))
        .expect("append");

    let raw = fs::read_to_string(dir.path().join("news.json")).expect("read");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let array = value.as_array().expect("array");
    assert_eq!(array.len(), 3);
    assert!(array[2]["title"].is_null());
    assert_eq!(array[2]["text"], "no title");
    assert!(array[2]["link"].is_string());
}
