// src/composing/pools.rs
//! Ranked sub-pools the layout draws from.

use crate::model::{ContentItem, ContentType, ScoredItem};
use std::collections::VecDeque;

/// A ranked queue of items, consumed from the front.
///
/// Pools are independent: an item that matches several filters sits in each
/// of those pools, and consuming it from one leaves the others untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPool {
    queue: VecDeque<ContentItem>,
}

impl SubPool {
    fn from_ranked(ranked: &[ScoredItem], keep: impl Fn(&ContentItem) -> bool) -> Self {
        Self {
            queue: ranked
                .iter()
                .map(|scored| &scored.item)
                .filter(|item| keep(*item))
                .cloned()
                .collect(),
        }
    }

    /// The front item, without consuming it.
    pub fn peek(&self) -> Option<&ContentItem> {
        self.queue.front()
    }

    /// Removes and returns the front item.
    pub fn take(&mut self) -> Option<ContentItem> {
        self.queue.pop_front()
    }

    /// Takes up to `limit` items from the front.
    pub fn take_up_to(&mut self, limit: usize) -> Vec<ContentItem> {
        let count = limit.min(self.queue.len());
        self.queue.drain(..count).collect()
    }

    /// Takes exactly `N` items from the front, or nothing when fewer remain.
    pub fn take_block<const N: usize>(&mut self) -> Option<[ContentItem; N]> {
        if self.queue.len() < N {
            return None;
        }

        let block: Vec<ContentItem> = self.queue.drain(..N).collect();
        match <[ContentItem; N]>::try_from(block) {
            Ok(block) => Some(block),
            Err(block) => {
                log::warn!("Returning {} items to the pool after a short block", block.len());
                for item in block.into_iter().rev() {
                    self.queue.push_front(item);
                }
                None
            }
        }
    }

    /// Removes up to `limit` items matching `predicate`, scanning in rank
    /// order. Non-matching items keep their position.
    pub fn take_matching(
        &mut self,
        limit: usize,
        predicate: impl Fn(&ContentItem) -> bool,
    ) -> Vec<ContentItem> {
        let mut taken = Vec::with_capacity(limit);
        let mut remaining = VecDeque::with_capacity(self.queue.len());
        for item in self.queue.drain(..) {
            if taken.len() < limit && predicate(&item) {
                taken.push(item);
            } else {
                remaining.push_back(item);
            }
        }
        self.queue = remaining;
        taken
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.queue.iter()
    }
}

/// The ranked list split into the pools the layout recipe consumes.
///
/// Each pool is an independent filter over the ranked list and keeps rank
/// order. `media` is not read by the current recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPools {
    pub deals: SubPool,
    pub sponsors: SubPool,
    pub articles: SubPool,
    pub media: SubPool,
}

impl SubPools {
    pub fn partition(ranked: &[ScoredItem]) -> Self {
        Self {
            deals: SubPool::from_ranked(ranked, ContentItem::is_deal),
            sponsors: SubPool::from_ranked(ranked, |item| {
                item.content_type == ContentType::Product
            }),
            articles: SubPool::from_ranked(ranked, |item| {
                item.content_type == ContentType::Article
            }),
            media: SubPool::from_ranked(ranked, |item| item.content_type == ContentType::Image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemId, PublishTime, PublisherId};
    use chrono::Utc;

    fn pool(ids: &[&str]) -> SubPool {
        SubPool {
            queue: ids
                .iter()
                .map(|id| ContentItem {
                    id: ItemId::parse(id).unwrap(),
                    publisher_id: PublisherId::parse("pub").unwrap(),
                    content_type: ContentType::Article,
                    category: None,
                    publish_time: PublishTime::from_datetime(Utc::now()),
                    url: None,
                    title: id.to_string(),
                    description: None,
                    image_url: None,
                    publisher_name: None,
                })
                .collect(),
        }
    }

    fn ids(pool: &SubPool) -> Vec<&str> {
        pool.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn test_take_block_leaves_short_pool_untouched() {
        let mut articles = pool(&["a1", "a2", "a3"]);
        assert!(articles.take_block::<6>().is_none());
        assert_eq!(ids(&articles), vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_take_block_consumes_from_front() {
        let mut articles = pool(&["a1", "a2", "a3", "a4"]);
        let [first, second] = articles.take_block::<2>().unwrap();
        assert_eq!(first.id.as_str(), "a1");
        assert_eq!(second.id.as_str(), "a2");
        assert_eq!(ids(&articles), vec!["a3", "a4"]);
    }

    #[test]
    fn test_take_matching_keeps_order_of_the_rest() {
        let mut articles = pool(&["x1", "y1", "x2", "y2", "x3"]);
        let taken = articles.take_matching(2, |item| item.id.as_str().starts_with('x'));
        let taken: Vec<&str> = taken.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(taken, vec!["x1", "x2"]);
        assert_eq!(ids(&articles), vec!["y1", "y2", "x3"]);
    }
}
