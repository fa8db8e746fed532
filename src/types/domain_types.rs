// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use url::{Host, Url};

/// Validated URL type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedUrl(Url);

// Manual Serialize/Deserialize implementation for Url
impl Serialize for ValidatedUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidatedUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ValidatedUrl::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl ValidatedUrl {
    /// Create a new validated URL
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url.trim()) {
            Ok(parsed_url) => {
                // Additional validation
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Get the URL as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Get the underlying URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// The registrable domain of this URL's host, if it has one.
    pub fn base_domain(&self) -> Option<BaseDomain> {
        BaseDomain::from_url(&self.0)
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Second-level labels that act as part of a public suffix under a
/// two-letter country TLD (`bbc.co.uk`, `abc.net.au`, `asahi.com.br`).
const COMPOUND_SECOND_LEVEL: &[&str] = &[
    "ac", "co", "com", "edu", "go", "gov", "ne", "net", "or", "org",
];

/// The registrable portion of a host name, e.g. `example.com` for
/// `www.example.com`. Always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseDomain(String);

impl BaseDomain {
    /// Extracts the base domain from a parsed URL.
    ///
    /// IP hosts are returned verbatim; URLs without a host yield `None`.
    pub fn from_url(url: &Url) -> Option<Self> {
        match url.host()? {
            Host::Domain(domain) => Self::from_host(domain),
            Host::Ipv4(addr) => Some(Self(addr.to_string())),
            Host::Ipv6(addr) => Some(Self(addr.to_string())),
        }
    }

    /// Extracts the base domain from a raw URL string. Unparseable input
    /// yields `None`.
    pub fn from_url_str(raw: &str) -> Option<Self> {
        Url::parse(raw.trim()).ok().and_then(|url| Self::from_url(&url))
    }

    /// Reduces a host name to its registrable domain.
    pub fn from_host(host: &str) -> Option<Self> {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();

        let keep = match labels.as_slice() {
            [] => return None,
            [.., second, tld]
                if labels.len() >= 3
                    && tld.len() == 2
                    && COMPOUND_SECOND_LEVEL.contains(second) =>
            {
                3
            }
            _ => 2.min(labels.len()),
        };

        Some(Self(labels[labels.len() - keep..].join(".")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a feed resource lives: a remote HTTP(S) endpoint or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocator {
    Remote(ValidatedUrl),
    Local(PathBuf),
}

impl ResourceLocator {
    /// Parses a locator. Anything with an `http://` or `https://` scheme is
    /// remote; `file://` URLs and bare paths are local.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::EmptyField("resource locator"));
        }

        let lowered = input.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            return ValidatedUrl::parse(input).map(Self::Remote);
        }

        if lowered.starts_with("file://") {
            let url = Url::parse(input).map_err(|e| ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: e.to_string(),
            })?;
            let path = url
                .to_file_path()
                .map_err(|_| ValidationError::InvalidFilePath {
                    path: input.to_string(),
                    reason: "file URL does not name a local path".to_string(),
                })?;
            return Ok(Self::Local(path));
        }

        if lowered.contains("://") {
            return Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: "Only HTTP, HTTPS and file locators are supported".to_string(),
            });
        }

        Ok(Self::Local(PathBuf::from(input)))
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{}", url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The two remote resources a load cycle reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedResource {
    Sources,
    Catalog,
}

impl fmt::Display for FeedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sources => write!(f, "source registry"),
            Self::Catalog => write!(f, "catalog"),
        }
    }
}

/// The final output of the render stage: a card deck ready for delivery.
#[derive(Debug, Clone)]
pub struct RenderedDeck(String);

impl RenderedDeck {
    pub fn new(content: String) -> Self {
        Self(content)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RenderedDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
