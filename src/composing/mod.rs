// src/composing/mod.rs
//! Arranges a ranked item list into the card sequence of one feed.
//!
//! The layout is a fixed recipe run once, top to bottom:
//!
//! 1. sponsor
//! 2. headline
//! 3. deals group (up to 3, horizontal)
//! 4. headline, headline, headline pair, headline pair (6 articles)
//! 5. category group (up to 3 articles sharing the lead article's category)
//! 6. sponsor
//! 7. deals group (up to 3, horizontal)
//!
//! A step whose pool cannot supply it emits nothing; no step fails the
//! composition. Step 4 needs all six articles and is skipped when fewer are
//! available, leaving those articles for step 5.

mod pools;

pub use pools::{SubPool, SubPools};

use crate::constants::{
    CATEGORY_GROUP_SIZE, DEALS_GROUP_TITLE, DEALS_PER_GROUP, HEADLINE_BLOCK_SIZE,
};
use crate::model::{Card, ContentItem, GroupAxis, ScoredItem};

/// Composes the card sequence for a ranked item list.
///
/// Pure: the input is only read, so composing the same list twice yields the
/// same cards.
pub fn compose_cards(ranked: &[ScoredItem]) -> Vec<Card> {
    let mut layout = Layout::new(SubPools::partition(ranked));

    layout.sponsor();
    layout.headline();
    layout.deals_group();
    layout.headline_block();
    layout.category_group();
    layout.sponsor();
    layout.deals_group();

    let cards = layout.finish();
    log::debug!(
        "Composed {} cards from {} ranked items",
        cards.len(),
        ranked.len()
    );
    cards
}

/// Composition state: the pools still to draw from and the cards so far.
struct Layout {
    pools: SubPools,
    cards: Vec<Card>,
}

impl Layout {
    fn new(pools: SubPools) -> Self {
        Self {
            pools,
            cards: Vec::new(),
        }
    }

    fn sponsor(&mut self) {
        if let Some(item) = self.pools.sponsors.take() {
            self.cards.push(Card::Sponsor { item });
        }
    }

    fn headline(&mut self) {
        if let Some(item) = self.pools.articles.take() {
            self.cards.push(Card::Headline { item });
        }
    }

    /// Always consumes up to a full group of deals, even when that leaves the
    /// group empty and unpublished.
    fn deals_group(&mut self) {
        let items = self.pools.deals.take_up_to(DEALS_PER_GROUP);
        self.push_group(DEALS_GROUP_TITLE.to_string(), items, GroupAxis::Horizontal);
    }

    fn headline_block(&mut self) {
        let Some([first, second, third, fourth, fifth, sixth]) =
            self.pools.articles.take_block::<HEADLINE_BLOCK_SIZE>()
        else {
            log::debug!(
                "Skipping headline block: {} of {} articles available",
                self.pools.articles.len(),
                HEADLINE_BLOCK_SIZE
            );
            return;
        };

        self.cards.push(Card::Headline { item: first });
        self.cards.push(Card::Headline { item: second });
        self.cards.push(Card::HeadlinePair {
            items: [third, fourth],
        });
        self.cards.push(Card::HeadlinePair {
            items: [fifth, sixth],
        });
    }

    fn category_group(&mut self) {
        let Some(category) = self
            .pools
            .articles
            .peek()
            .and_then(|lead| lead.category.clone())
        else {
            return;
        };

        let items = self
            .pools
            .articles
            .take_matching(CATEGORY_GROUP_SIZE, |item| {
                item.category.as_deref() == Some(category.as_str())
            });
        self.push_group(category, items, GroupAxis::Vertical);
    }

    fn push_group(&mut self, title: String, items: Vec<ContentItem>, axis: GroupAxis) {
        if items.is_empty() {
            return;
        }
        self.cards.push(Card::Group {
            title,
            items,
            axis,
            display_brand: false,
        });
    }

    fn finish(self) -> Vec<Card> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentType;
    use crate::types::{ItemId, PublishTime, PublisherId};
    use chrono::{TimeZone, Utc};

    fn scored(id: &str, content_type: ContentType, publisher: &str, category: Option<&str>) -> ScoredItem {
        let item = ContentItem {
            id: ItemId::parse(id).unwrap(),
            publisher_id: PublisherId::parse(publisher).unwrap(),
            content_type,
            category: category.map(str::to_string),
            publish_time: PublishTime::from_datetime(
                Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            ),
            url: None,
            title: id.to_string(),
            description: None,
            image_url: None,
            publisher_name: None,
        };
        ScoredItem::new(item, 0.0)
    }

    fn article(id: &str, category: Option<&str>) -> ScoredItem {
        scored(id, ContentType::Article, "news", category)
    }

    fn ids(card: &Card) -> Vec<&str> {
        card.items().iter().map(|i| i.id.as_str()).collect()
    }

    fn kinds(cards: &[Card]) -> Vec<&'static str> {
        cards.iter().map(Card::kind).collect()
    }

    #[test]
    fn test_empty_pool_yields_no_cards() {
        assert!(compose_cards(&[]).is_empty());
    }

    #[test]
    fn test_headline_block_skipped_below_six_articles() {
        let ranked: Vec<ScoredItem> = (1..=6)
            .map(|n| article(&format!("a{}", n), Some("world")))
            .collect();

        // Step 2 takes a1, leaving five: step 4 is skipped and step 5 groups
        // the next three.
        let cards = compose_cards(&ranked);
        assert_eq!(kinds(&cards), vec!["headline", "group"]);
        assert_eq!(ids(&cards[1]), vec!["a2", "a3", "a4"]);
        assert_eq!(cards[1].title(), Some("world"));
    }

    #[test]
    fn test_headline_block_layout_with_exactly_seven_articles() {
        let ranked: Vec<ScoredItem> = (1..=7).map(|n| article(&format!("a{}", n), None)).collect();

        let cards = compose_cards(&ranked);
        assert_eq!(
            kinds(&cards),
            vec!["headline", "headline", "headline", "headline_pair", "headline_pair"]
        );
        assert_eq!(ids(&cards[3]), vec!["a4", "a5"]);
        assert_eq!(ids(&cards[4]), vec!["a6", "a7"]);
    }

    #[test]
    fn test_category_group_scans_past_other_categories() {
        let mut ranked: Vec<ScoredItem> = (1..=7).map(|n| article(&format!("a{}", n), None)).collect();
        ranked.push(article("t1", Some("tech")));
        ranked.push(article("s1", Some("sports")));
        ranked.push(article("t2", Some("tech")));
        ranked.push(article("n1", None));
        ranked.push(article("t3", Some("tech")));
        ranked.push(article("t4", Some("tech")));

        let cards = compose_cards(&ranked);
        let group = cards.last().unwrap();
        assert_eq!(group.title(), Some("tech"));
        assert_eq!(ids(group), vec!["t1", "t2", "t3"]);
        assert!(matches!(
            group,
            Card::Group {
                axis: GroupAxis::Vertical,
                display_brand: false,
                ..
            }
        ));
    }

    #[test]
    fn test_category_group_omitted_when_lead_has_no_category() {
        let mut ranked: Vec<ScoredItem> = (1..=7).map(|n| article(&format!("a{}", n), None)).collect();
        ranked.push(article("plain", None));
        ranked.push(article("t1", Some("tech")));

        let cards = compose_cards(&ranked);
        assert!(cards.iter().all(|card| card.title().is_none()));
    }

    #[test]
    fn test_two_sponsor_slots() {
        let ranked = vec![
            scored("p1", ContentType::Product, "shop", None),
            scored("p2", ContentType::Product, "shop", None),
            scored("p3", ContentType::Product, "shop", None),
        ];
        let cards = compose_cards(&ranked);
        assert_eq!(kinds(&cards), vec!["sponsor", "sponsor"]);
        assert_eq!(ids(&cards[1]), vec!["p2"]);
    }

    #[test]
    fn test_deals_groups_take_three_then_the_rest() {
        let ranked: Vec<ScoredItem> = (1..=5)
            .map(|n| scored(&format!("d{}", n), ContentType::Other, "brave_offers", None))
            .collect();
        let cards = compose_cards(&ranked);
        assert_eq!(kinds(&cards), vec!["group", "group"]);
        assert_eq!(ids(&cards[0]), vec!["d1", "d2", "d3"]);
        assert_eq!(ids(&cards[1]), vec!["d4", "d5"]);
        assert_eq!(cards[0].title(), Some("Deals"));
        assert!(matches!(
            cards[0],
            Card::Group {
                axis: GroupAxis::Horizontal,
                display_brand: false,
                ..
            }
        ));
    }

    #[test]
    fn test_deals_product_fills_sponsor_and_deals_slots() {
        let ranked = vec![
            scored("offer1", ContentType::Product, "brave_offers", None),
            scored("offer2", ContentType::Product, "brave_offers", None),
            article("a1", None),
        ];
        let cards = compose_cards(&ranked);
        assert_eq!(kinds(&cards), vec!["sponsor", "headline", "group", "sponsor"]);
        assert_eq!(ids(&cards[0]), vec!["offer1"]);
        assert_eq!(ids(&cards[2]), vec!["offer1", "offer2"]);
        assert_eq!(ids(&cards[3]), vec!["offer2"]);
    }

    #[test]
    fn test_deals_article_fills_headline_and_deals_slots() {
        let ranked = vec![scored("story", ContentType::Article, "brave_offers", None)];
        let cards = compose_cards(&ranked);
        assert_eq!(kinds(&cards), vec!["headline", "group"]);
        assert_eq!(ids(&cards[0]), vec!["story"]);
        assert_eq!(ids(&cards[1]), vec!["story"]);
        assert_eq!(cards[1].title(), Some("Deals"));
    }

    #[test]
    fn test_images_are_never_placed() {
        let ranked = vec![
            scored("i1", ContentType::Image, "photos", None),
            scored("i2", ContentType::Image, "photos", None),
        ];
        assert!(compose_cards(&ranked).is_empty());
        assert_eq!(SubPools::partition(&ranked).media.len(), 2);
    }

    #[test]
    fn test_composition_is_repeatable() {
        let mut ranked: Vec<ScoredItem> = (1..=12)
            .map(|n| article(&format!("a{}", n), Some(if n % 2 == 0 { "even" } else { "odd" })))
            .collect();
        ranked.push(scored("p1", ContentType::Product, "shop", None));
        ranked.push(scored("d1", ContentType::Other, "brave_offers", None));

        assert_eq!(compose_cards(&ranked), compose_cards(&ranked));
    }
}
