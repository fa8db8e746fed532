// src/api/mod.rs
//! Feed retrieval: the ability to load the source registry and catalog.
//!
//! I/O lives in `client` and `FeedClient`; `parser` and `responses` are pure
//! and can be exercised without a network.

pub mod client;
pub mod parser;
mod responses;
mod types;

pub use client::{ApiResponse, FeedHttpClient};
pub use types::LossyDecode;

use crate::config::PipelineConfig;
use crate::error::AppError;
use crate::model::{ContentItem, SourceRegistry};
use crate::types::{FeedResource, ResourceLocator};

/// The ability to retrieve the two feed resources.
///
/// The load orchestrator depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait FeedRepository: Send + Sync {
    async fn fetch_sources(&self) -> Result<SourceRegistry, AppError>;
    async fn fetch_catalog(&self) -> Result<LossyDecode<ContentItem>, AppError>;
}

/// Reads feed resources from HTTP endpoints or local files.
#[derive(Clone)]
pub struct FeedClient {
    http: FeedHttpClient,
    sources: ResourceLocator,
    catalog: ResourceLocator,
}

impl FeedClient {
    pub fn new(
        http: FeedHttpClient,
        sources: ResourceLocator,
        catalog: ResourceLocator,
    ) -> Self {
        Self {
            http,
            sources,
            catalog,
        }
    }

    /// Builds a client for the locators and timeout in `config`.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, AppError> {
        let http = FeedHttpClient::new(config.http_timeout)?;
        Ok(Self::new(
            http,
            config.sources.clone(),
            config.catalog.clone(),
        ))
    }

    async fn read(
        &self,
        resource: FeedResource,
        locator: &ResourceLocator,
    ) -> Result<ApiResponse<String>, AppError> {
        match locator {
            ResourceLocator::Remote(url) => {
                let response = self.http.get(url).await?;
                client::extract_response_text(response).await
            }
            ResourceLocator::Local(path) => {
                log::debug!("Reading {} from {}", resource, path.display());
                let data = tokio::fs::read_to_string(path).await.map_err(|source| {
                    AppError::ResourceRead {
                        resource,
                        path: path.display().to_string(),
                        source,
                    }
                })?;
                Ok(ApiResponse {
                    data,
                    status: reqwest::StatusCode::OK,
                    url: path.display().to_string(),
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl FeedRepository for FeedClient {
    async fn fetch_sources(&self) -> Result<SourceRegistry, AppError> {
        let response = self.read(FeedResource::Sources, &self.sources).await?;
        parser::parse_sources_response(response)
    }

    async fn fetch_catalog(&self) -> Result<LossyDecode<ContentItem>, AppError> {
        let response = self.read(FeedResource::Catalog, &self.catalog).await?;
        parser::parse_catalog_response(response)
    }
}
