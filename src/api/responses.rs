// src/api/responses.rs
//! Wire records for the feed endpoints.
//!
//! These mirror the JSON exactly and are converted into domain types through
//! `ToDomain`, which is where field-level validation happens.

use crate::model::{ContentItem, ContentType, PublisherSource};
use crate::types::{ItemId, PublishTime, PublisherId, ValidatedUrl};
use serde::Deserialize;

/// One catalog record as the feed sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItemRecord {
    pub url_hash: String,
    pub publisher_id: String,
    pub content_type: ContentType,
    pub publish_time: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "padded_img")]
    pub img: Option<String>,
    #[serde(default)]
    pub publisher_name: Option<String>,
}

/// One publisher entry in the registry, keyed by publisher id.
#[derive(Debug, Clone, Deserialize)]
pub struct PublisherRecord {
    pub publisher_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// A field that failed validation while converting a wire record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    fn new(field: &'static str, reason: impl ToString) -> Self {
        Self {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Trait for converting wire records to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, FieldError>;
}

impl ToDomain<ContentItem> for FeedItemRecord {
    fn to_domain(self) -> Result<ContentItem, FieldError> {
        let id = ItemId::parse(&self.url_hash).map_err(|e| FieldError::new("url_hash", e))?;
        let publisher_id = PublisherId::parse(&self.publisher_id)
            .map_err(|e| FieldError::new("publisher_id", e))?;
        let publish_time = PublishTime::parse(&self.publish_time)
            .map_err(|e| FieldError::new("publish_time", e))?;
        let url = non_blank(self.url)
            .map(|raw| ValidatedUrl::parse(&raw))
            .transpose()
            .map_err(|e| FieldError::new("url", e))?;

        // The image is decoration; a bad one is discarded instead of the item.
        let image_url = non_blank(self.img).and_then(|raw| match ValidatedUrl::parse(&raw) {
            Ok(url) => Some(url),
            Err(e) => {
                log::debug!("Ignoring image of item {}: {}", id, e);
                None
            }
        });

        Ok(ContentItem {
            id,
            publisher_id,
            content_type: self.content_type,
            category: non_blank(self.category),
            publish_time,
            url,
            title: self.title,
            description: non_blank(self.description),
            image_url,
            publisher_name: non_blank(self.publisher_name),
        })
    }
}

/// Registry entries need their key to become a full `PublisherSource`.
impl ToDomain<PublisherSource> for (String, PublisherRecord) {
    fn to_domain(self) -> Result<PublisherSource, FieldError> {
        let (key, record) = self;
        let publisher_id =
            PublisherId::parse(&key).map_err(|e| FieldError::new("publisher_id", e))?;
        let site_url = non_blank(record.site_url).and_then(|raw| match ValidatedUrl::parse(&raw) {
            Ok(url) => Some(url),
            Err(e) => {
                log::debug!("Ignoring site URL of publisher {}: {}", publisher_id, e);
                None
            }
        });

        Ok(PublisherSource {
            publisher_id,
            publisher_name: record.publisher_name,
            category: non_blank(record.category),
            site_url,
            enabled: record.enabled,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
