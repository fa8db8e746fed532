//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

pub const PUBLISH_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The fixed "now" every fixture is aged against.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn published_hours_ago(hours: i64) -> String {
    (fixed_now() - Duration::hours(hours))
        .format(PUBLISH_FORMAT)
        .to_string()
}

/// One catalog record in wire form.
pub fn record(
    id: &str,
    publisher: &str,
    content_type: &str,
    category: Option<&str>,
    hours_ago: i64,
) -> Value {
    json!({
        "url_hash": id,
        "publisher_id": publisher,
        "content_type": content_type,
        "category": category,
        "publish_time": published_hours_ago(hours_ago),
        "url": format!("https://www.{}.example/{}", publisher, id),
        "title": format!("Title {}", id),
        "description": "",
        "img": format!("https://img.{}.example/{}.jpg", publisher, id),
        "publisher_name": publisher,
    })
}

/// The mixed catalog used by the layout scenarios: 5 products, 20 articles
/// (4 of them "tech", at article ranks 8, 10, 12 and 14) and 4 deals.
///
/// Article `aN` is N hours old, so ranking keeps the article order.
pub fn mixed_catalog() -> Value {
    let mut records = Vec::new();

    for n in 1..=5 {
        records.push(record(&format!("p{}", n), "shop", "product", None, n));
    }

    for n in 1..=20 {
        let category = if [8, 10, 12, 14].contains(&n) {
            "tech"
        } else {
            "world"
        };
        records.push(record(
            &format!("a{}", n),
            "daily",
            "article",
            Some(category),
            n,
        ));
    }

    for n in 1..=4 {
        records.push(record(&format!("d{}", n), "brave_offers", "offer", None, n));
    }

    Value::Array(records)
}

pub fn registry() -> Value {
    json!({
        "daily": {
            "publisher_name": "The Daily",
            "category": "World",
            "site_url": "https://www.daily.example",
            "enabled": true
        },
        "shop": {
            "publisher_name": "Shop",
            "enabled": true
        },
        "brave_offers": {
            "publisher_name": "Brave Offers",
            "enabled": true
        }
    })
}
