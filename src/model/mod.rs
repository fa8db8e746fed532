mod card;

pub use card::{Card, CardVisitor, GroupAxis};

use crate::constants::DEALS_PUBLISHER_ID;
use crate::types::{BaseDomain, ItemId, PublishTime, PublisherId, ValidatedUrl};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of content an item carries.
///
/// Only `Article`, `Product` and `Image` take part in composition; any other
/// value the feed sends decodes to `Other` and is ignored by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Article,
    Product,
    Image,
    #[serde(other)]
    Other,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Article => "article",
            Self::Product => "product",
            Self::Image => "image",
            Self::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// A single piece of content from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub publisher_id: PublisherId,
    pub content_type: ContentType,
    pub category: Option<String>,
    pub publish_time: PublishTime,
    pub url: Option<ValidatedUrl>,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<ValidatedUrl>,
    pub publisher_name: Option<String>,
}

impl ContentItem {
    /// Base domain of the item's source URL, if it has one.
    pub fn base_domain(&self) -> Option<BaseDomain> {
        self.url.as_ref().and_then(ValidatedUrl::base_domain)
    }

    /// Whether this item comes from the deals publisher.
    pub fn is_deal(&self) -> bool {
        self.publisher_id == *DEALS_PUBLISHER_ID
    }
}

/// Metadata describing one publisher in the source registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublisherSource {
    pub publisher_id: PublisherId,
    pub publisher_name: String,
    pub category: Option<String>,
    pub site_url: Option<ValidatedUrl>,
    pub enabled: bool,
}

/// The decoded registry, keyed by publisher id in payload order.
pub type SourceRegistry = IndexMap<PublisherId, PublisherSource>;

/// A catalog item paired with its ranking score. Lower scores rank first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    pub item: ContentItem,
    pub score: f64,
}

impl ScoredItem {
    pub fn new(item: ContentItem, score: f64) -> Self {
        Self { item, score }
    }
}
