// src/history/mod.rs
//! Browsing history as a personalization signal.
//!
//! The scorer only needs the set of base domains among the most recent
//! history entries. Where that history comes from is a collaborator behind
//! `HistoryProvider`; an unavailable history degrades to an empty set.

use crate::error::AppError;
use crate::types::BaseDomain;
use std::collections::HashSet;
use std::path::PathBuf;

/// The ability to list recently visited URLs, most recent first.
#[async_trait::async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn recent_urls(&self, limit: usize) -> Result<Vec<String>, AppError>;
}

/// A provider with no history at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

#[async_trait::async_trait]
impl HistoryProvider for NoHistory {
    async fn recent_urls(&self, _limit: usize) -> Result<Vec<String>, AppError> {
        Ok(Vec::new())
    }
}

/// In-memory history, most recent first.
#[derive(Debug, Clone, Default)]
pub struct StaticHistory {
    urls: Vec<String>,
}

impl StaticHistory {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait::async_trait]
impl HistoryProvider for StaticHistory {
    async fn recent_urls(&self, limit: usize) -> Result<Vec<String>, AppError> {
        Ok(self.urls.iter().take(limit).cloned().collect())
    }
}

/// History exported to a text file: one URL per line, most recent first.
/// Blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl HistoryProvider for FileHistory {
    async fn recent_urls(&self, limit: usize) -> Result<Vec<String>, AppError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::HistoryUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .take(limit)
            .map(str::to_string)
            .collect())
    }
}

/// Base domains the user has visited recently. Order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedDomains(HashSet<BaseDomain>);

impl VisitedDomains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the base domains of `urls`, skipping anything unparseable.
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            urls.into_iter()
                .filter_map(|url| BaseDomain::from_url_str(url.as_ref()))
                .collect(),
        )
    }

    pub fn contains(&self, domain: &BaseDomain) -> bool {
        self.0.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<BaseDomain> for VisitedDomains {
    fn from_iter<I: IntoIterator<Item = BaseDomain>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reads the visited-domain set from the `window` most recent entries.
///
/// Never fails: an unavailable history is logged and treated as empty.
pub async fn visited_domains(provider: &dyn HistoryProvider, window: usize) -> VisitedDomains {
    match provider.recent_urls(window).await {
        Ok(urls) => {
            let domains = VisitedDomains::from_urls(urls.iter().take(window));
            log::debug!(
                "Personalizing with {} domains from {} history entries",
                domains.len(),
                urls.len().min(window)
            );
            domains
        }
        Err(e) => {
            log::warn!("History unavailable, ranking without personalization: {}", e);
            VisitedDomains::new()
        }
    }
}
