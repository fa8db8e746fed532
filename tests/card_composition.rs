//! Ranking and layout of a decoded catalog into cards.

mod common;

use cardfeed::{
    compose_cards, decode_catalog, rank_items, Card, ContentItem, GroupAxis, StaticHistory,
    VisitedDomains,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn decode(catalog: serde_json::Value) -> Vec<ContentItem> {
    decode_catalog(&catalog.to_string(), "fixture")
        .expect("fixture catalog decodes")
        .items
}

/// Renders a card as `kind(title: ids)` for compact comparison.
fn describe(card: &Card) -> String {
    let ids: Vec<&str> = card.items().iter().map(|item| item.id.as_str()).collect();
    match card.title() {
        Some(title) => format!("{}({}: {})", card.kind(), title, ids.join(",")),
        None => format!("{}({})", card.kind(), ids.join(",")),
    }
}

#[test]
fn test_mixed_catalog_layout() {
    let ranked = rank_items(
        decode(common::mixed_catalog()),
        common::fixed_now(),
        &VisitedDomains::new(),
    );
    let cards = compose_cards(&ranked);

    let layout: Vec<String> = cards.iter().map(describe).collect();
    assert_eq!(
        layout,
        vec![
            "sponsor(p1)",
            "headline(a1)",
            "group(Deals: d1,d2,d3)",
            "headline(a2)",
            "headline(a3)",
            "headline_pair(a4,a5)",
            "headline_pair(a6,a7)",
            "group(tech: a8,a10,a12)",
            "sponsor(p2)",
            "group(Deals: d4)",
        ]
    );

    match &cards[7] {
        Card::Group { axis, display_brand, .. } => {
            assert_eq!(*axis, GroupAxis::Vertical);
            assert!(!display_brand);
        }
        other => panic!("expected the category group, got {:?}", other),
    }
    match &cards[2] {
        Card::Group { axis, .. } => assert_eq!(*axis, GroupAxis::Horizontal),
        other => panic!("expected the deals group, got {:?}", other),
    }
}

#[test]
fn test_deals_products_also_fill_sponsor_slots() {
    let catalog = json!([
        common::record("offer1", "brave_offers", "product", None, 1),
        common::record("offer2", "brave_offers", "product", None, 2),
        common::record("a1", "daily", "article", None, 3),
    ]);
    let ranked = rank_items(decode(catalog), common::fixed_now(), &VisitedDomains::new());
    let cards = compose_cards(&ranked);

    let layout: Vec<String> = cards.iter().map(describe).collect();
    assert_eq!(
        layout,
        vec![
            "sponsor(offer1)",
            "headline(a1)",
            "group(Deals: offer1,offer2)",
            "sponsor(offer2)",
        ]
    );
}

#[test]
fn test_deals_articles_also_fill_headlines() {
    let catalog = json!([
        common::record("promo", "brave_offers", "article", Some("shopping"), 1),
        common::record("a1", "daily", "article", Some("world"), 2),
    ]);
    let ranked = rank_items(decode(catalog), common::fixed_now(), &VisitedDomains::new());
    let cards = compose_cards(&ranked);

    let layout: Vec<String> = cards.iter().map(describe).collect();
    assert_eq!(
        layout,
        vec!["headline(promo)", "group(Deals: promo)", "group(world: a1)"]
    );
}

#[test]
fn test_visited_domain_moves_older_article_to_the_headline() {
    let catalog = json!([
        common::record("fresh", "daily", "article", Some("world"), 1),
        common::record("older", "weekly", "article", Some("world"), 30),
    ]);
    let visited = VisitedDomains::from_urls(["https://news.weekly.example/some/story"]);

    let ranked = rank_items(decode(catalog), common::fixed_now(), &visited);
    let ids: Vec<&str> = ranked.iter().map(|s| s.item.id.as_str()).collect();
    assert_eq!(ids, vec!["older", "fresh"]);

    let cards = compose_cards(&ranked);
    assert_eq!(describe(&cards[0]), "headline(older)");
}

#[test]
fn test_future_items_rank_with_zero_recency() {
    let catalog = json!([
        common::record("past", "daily", "article", None, 2),
        common::record("scheduled", "daily", "article", None, -5),
    ]);
    let ranked = rank_items(decode(catalog), common::fixed_now(), &VisitedDomains::new());

    assert_eq!(ranked[0].item.id.as_str(), "scheduled");
    assert_eq!(ranked[0].score, 0.0);
    assert!(ranked[1].score > 0.0);
}

#[tokio::test]
async fn test_history_provider_feeds_the_visited_set() {
    let history = StaticHistory::new([
        "https://www.daily.example/a1",
        "not a url",
        "https://shop.example/cart",
    ]);
    let visited = cardfeed::visited_domains(&history, 10).await;

    assert_eq!(visited.len(), 2);
}
