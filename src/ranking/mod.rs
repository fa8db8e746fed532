// src/ranking/mod.rs
//! Scores catalog items and orders them for composition.
//!
//! The score is `ln(seconds since publication)`, or `0` for items that are
//! not yet in the past, minus a fixed penalty when the item's domain is in
//! the visited set. Lower scores rank first. An older item therefore scores
//! higher than a fresh one; that ordering is the established behaviour of
//! the feed and is kept as is.

use crate::constants::VISITED_DOMAIN_PENALTY;
use crate::history::VisitedDomains;
use crate::model::{ContentItem, ScoredItem};
use chrono::{DateTime, Utc};

/// Recency component of the score.
pub fn recency_score(item: &ContentItem, now: DateTime<Utc>) -> f64 {
    let elapsed = item.publish_time.seconds_until(now);
    if elapsed > 0 {
        (elapsed as f64).ln()
    } else {
        0.0
    }
}

/// Full score of one item.
pub fn score_item(item: &ContentItem, now: DateTime<Utc>, visited: &VisitedDomains) -> f64 {
    let mut score = recency_score(item, now);
    if item
        .base_domain()
        .is_some_and(|domain| visited.contains(&domain))
    {
        score -= VISITED_DOMAIN_PENALTY;
    }
    score
}

/// Scores every item and stable-sorts the result ascending by score.
///
/// Produces exactly one `ScoredItem` per input item. Items with equal scores
/// keep their catalog order.
pub fn rank_items(
    items: Vec<ContentItem>,
    now: DateTime<Utc>,
    visited: &VisitedDomains,
) -> Vec<ScoredItem> {
    let mut scored: Vec<ScoredItem> = items
        .into_iter()
        .map(|item| {
            let score = score_item(&item, now, visited);
            ScoredItem::new(item, score)
        })
        .collect();

    // `sort_by` is stable; equal scores keep catalog order.
    scored.sort_by(|a, b| a.score.total_cmp(&b.score));

    log::debug!("Ranked {} items", scored.len());
    scored
}
