// src/api/parser.rs
//! Pure parsing of feed responses into domain types.
//!
//! The registry is decoded strictly: one bad entry fails the whole payload.
//! The catalog is decoded record by record; a record that does not match the
//! schema is dropped and reported, never fatal to its siblings.

use super::client::ApiResponse;
use super::responses::{FeedItemRecord, PublisherRecord, ToDomain};
use super::types::LossyDecode;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, RecordError};
use crate::model::{ContentItem, SourceRegistry};
use crate::types::FeedResource;
use indexmap::IndexMap;
use serde_json::Value;

/// Parses a registry response into the publisher map.
pub fn parse_sources_response(result: ApiResponse<String>) -> Result<SourceRegistry, AppError> {
    ensure_success(&result, FeedResource::Sources)?;

    let records: IndexMap<String, PublisherRecord> =
        serde_json::from_str(&result.data).map_err(|source| {
            log::error!("Failed to parse source registry from {}: {}", result.url, source);
            AppError::Decode {
                resource: FeedResource::Sources,
                url: result.url.clone(),
                source,
            }
        })?;

    let mut registry = SourceRegistry::with_capacity(records.len());
    for entry in records {
        let source = entry.to_domain().map_err(|e| {
            AppError::MalformedResponse(format!(
                "source registry entry has an invalid {}: {}",
                e.field, e.reason
            ))
        })?;
        registry.insert(source.publisher_id.clone(), source);
    }

    Ok(registry)
}

/// Parses a catalog response, dropping records that fail to decode.
pub fn parse_catalog_response(
    result: ApiResponse<String>,
) -> Result<LossyDecode<ContentItem>, AppError> {
    ensure_success(&result, FeedResource::Catalog)?;
    decode_catalog(&result.data, &result.url)
}

/// Decodes a catalog body. Only a body that is not a JSON array fails as a
/// whole.
pub fn decode_catalog(body: &str, url: &str) -> Result<LossyDecode<ContentItem>, AppError> {
    let records: Vec<Value> = serde_json::from_str(body).map_err(|source| {
        log::error!("Failed to parse catalog from {}: {}", url, source);
        AppError::Decode {
            resource: FeedResource::Catalog,
            url: url.to_string(),
            source,
        }
    })?;

    let mut items = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match decode_item(index, record) {
            Ok(item) => items.push(item),
            Err(e) => {
                log::debug!("Dropping catalog {}", e);
                rejected.push(e);
            }
        }
    }

    if !rejected.is_empty() {
        log::warn!(
            "Dropped {} of {} catalog records from {}",
            rejected.len(),
            items.len() + rejected.len(),
            url
        );
    }

    Ok(LossyDecode::new(items, rejected))
}

fn decode_item(index: usize, record: Value) -> Result<ContentItem, RecordError> {
    let record: FeedItemRecord =
        serde_json::from_value(record).map_err(|e| RecordError::Schema {
            index,
            reason: e.to_string(),
        })?;

    record.to_domain().map_err(|e| RecordError::InvalidField {
        index,
        field: e.field,
        reason: e.reason,
    })
}

/// Turns a non-success HTTP status into a `FeedService` error.
fn ensure_success(result: &ApiResponse<String>, resource: FeedResource) -> Result<(), AppError> {
    if result.status.is_success() {
        return Ok(());
    }

    log::error!("HTTP {} fetching the {} from {}", result.status, resource, result.url);
    Err(AppError::FeedService {
        resource,
        status: result.status,
        url: result.url.clone(),
        preview: preview_body(&result.data),
    })
}

fn preview_body(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let truncated: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        body.to_string()
    }
}
