// src/analytics/mod.rs
//! Card deck measurement for completion reports and logs.

use crate::model::{Card, CardVisitor, ContentItem, GroupAxis};
use serde::Serialize;

/// Counts of cards per variant and of items on display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeckSummary {
    pub total_cards: usize,
    pub items_shown: usize,
    pub sponsors: usize,
    pub headlines: usize,
    pub headline_pairs: usize,
    pub groups: usize,
    pub numbered: usize,
}

impl CardVisitor for DeckSummary {
    fn visit_sponsor(&mut self, _item: &ContentItem) {
        self.sponsors += 1;
        self.items_shown += 1;
    }

    fn visit_headline(&mut self, _item: &ContentItem) {
        self.headlines += 1;
        self.items_shown += 1;
    }

    fn visit_headline_pair(&mut self, _first: &ContentItem, _second: &ContentItem) {
        self.headline_pairs += 1;
        self.items_shown += 2;
    }

    fn visit_group(
        &mut self,
        _title: &str,
        items: &[ContentItem],
        _axis: GroupAxis,
        _display_brand: bool,
    ) {
        self.groups += 1;
        self.items_shown += items.len();
    }

    fn visit_numbered(&mut self, _title: &str, items: &[ContentItem]) {
        self.numbered += 1;
        self.items_shown += items.len();
    }
}

/// Measures a card sequence.
pub fn measure_cards(cards: &[Card]) -> DeckSummary {
    let mut summary = DeckSummary {
        total_cards: cards.len(),
        ..DeckSummary::default()
    };
    for card in cards {
        card.accept(&mut summary);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentType;
    use crate::types::{ItemId, PublishTime, PublisherId};
    use chrono::Utc;

    fn item(id: &str) -> ContentItem {
        ContentItem {
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
        }
    }

    #[test]
    fn test_counts_each_variant() {
        let cards = vec![
            Card::Sponsor { item: item("p") },
            Card::Headline { item: item("a") },
            Card::HeadlinePair {
                items: [item("b"), item("c")],
            },
            Card::Group {
                title: "Deals".to_string(),
                items: vec![item("d"), item("e"), item("f")],
                axis: GroupAxis::Horizontal,
                display_brand: false,
            },
            Card::Numbered {
                title: "Top".to_string(),
                items: vec![item("g")],
            },
        ];

        let summary = measure_cards(&cards);
        assert_eq!(
            summary,
            DeckSummary {
                total_cards: 5,
                items_shown: 8,
                sponsors: 1,
                headlines: 1,
                headline_pairs: 1,
                groups: 1,
                numbered: 1,
            }
        );
    }

    #[test]
    fn test_empty_deck() {
        assert_eq!(measure_cards(&[]), DeckSummary::default());
    }
}
