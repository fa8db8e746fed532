// src/api/client.rs
//! Pure HTTP client wrapper for the feed endpoints.
//!
//! This module provides a thin wrapper around reqwest for fetching feed
//! resources. It handles headers and timeouts without parsing or business
//! logic.

use crate::error::AppError;
use crate::types::ValidatedUrl;
use reqwest::{header, Client, Response};
use std::time::Duration;

/// A thin wrapper around reqwest Client for feed requests.
#[derive(Clone)]
pub struct FeedHttpClient {
    client: Client,
}

impl FeedHttpClient {
    /// Creates a new HTTP client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .user_agent(concat!("cardfeed/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for feed requests.
    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Makes a GET request to the given URL.
    pub async fn get(&self, url: &ValidatedUrl) -> Result<Response, AppError> {
        log::debug!("GET {}", url);

        let response = self.client.get(url.as_url().clone()).send().await?;

        log::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
