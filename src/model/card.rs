// src/model/card.rs
//! The display cards a composed feed is made of.

use super::ContentItem;
use serde::Serialize;

/// Which way a group card lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupAxis {
    Horizontal,
    Vertical,
}

/// One renderable unit of the composed feed.
///
/// The set of variants is closed. `Numbered` is part of the vocabulary that
/// renderers must understand even though the current layout never emits it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "card", rename_all = "snake_case")]
pub enum Card {
    /// A single sponsored product.
    Sponsor { item: ContentItem },
    /// A single article shown large.
    Headline { item: ContentItem },
    /// Two articles shown side by side.
    HeadlinePair { items: [ContentItem; 2] },
    /// A titled run of items.
    Group {
        title: String,
        items: Vec<ContentItem>,
        axis: GroupAxis,
        display_brand: bool,
    },
    /// A titled, numbered list of items.
    Numbered {
        title: String,
        items: Vec<ContentItem>,
    },
}

impl Card {
    /// The card kind as it appears in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            Card::Sponsor { .. } => "sponsor",
            Card::Headline { .. } => "headline",
            Card::HeadlinePair { .. } => "headline_pair",
            Card::Group { .. } => "group",
            Card::Numbered { .. } => "numbered",
        }
    }

    /// Title of group and numbered cards.
    pub fn title(&self) -> Option<&str> {
        match self {
            Card::Group { title, .. } | Card::Numbered { title, .. } => Some(title),
            _ => None,
        }
    }

    /// Every item this card displays, in display order.
    pub fn items(&self) -> &[ContentItem] {
        match self {
            Card::Sponsor { item } | Card::Headline { item } => std::slice::from_ref(item),
            Card::HeadlinePair { items } => items,
            Card::Group { items, .. } | Card::Numbered { items, .. } => items,
        }
    }

    /// Dispatches to the matching visitor method.
    pub fn accept<V: CardVisitor>(&self, visitor: &mut V) {
        match self {
            Card::Sponsor { item } => visitor.visit_sponsor(item),
            Card::Headline { item } => visitor.visit_headline(item),
            Card::HeadlinePair { items } => visitor.visit_headline_pair(&items[0], &items[1]),
            Card::Group {
                title,
                items,
                axis,
                display_brand,
            } => visitor.visit_group(title, items, *axis, *display_brand),
            Card::Numbered { title, items } => visitor.visit_numbered(title, items),
        }
    }
}

/// Visitor over card variants. Every method defaults to a no-op so visitors
/// only implement the variants they care about.
pub trait CardVisitor {
    fn visit_sponsor(&mut self, _item: &ContentItem) {}

    fn visit_headline(&mut self, _item: &ContentItem) {}

    fn visit_headline_pair(&mut self, _first: &ContentItem, _second: &ContentItem) {}

    fn visit_group(
        &mut self,
        _title: &str,
        _items: &[ContentItem],
        _axis: GroupAxis,
        _display_brand: bool,
    ) {
    }

    fn visit_numbered(&mut self, _title: &str, _items: &[ContentItem]) {}
}
