// src/lib.rs
//! cardfeed library: loads a news feed and lays it out as a card deck.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`, `RecordError`, `LoadFailure`
//! - **Configuration**: `PipelineConfig`, `CommandLineInput`
//! - **Domain model**: `ContentItem`, `PublisherSource`, `Card`
//! - **Domain types**: `ItemId`, `PublisherId`, `PublishTime`, `BaseDomain`
//! - **Feed retrieval**: `FeedRepository`, `FeedClient`, parsers
//! - **Ranking and layout**: `rank_items`, `compose_cards`
//! - **Load orchestration**: `FeedLoader`, `FeedSnapshot`
//! - **Output**: `render_deck`, `plan_delivery`, `deliver`

mod analytics;
mod api;
mod composing;
mod config;
mod constants;
mod error;
mod formatting;
mod history;
mod loader;
mod model;
mod output;
mod pipeline;
mod ranking;
mod types;

// --- Error Handling ---
pub use crate::error::{classify_load_failure, AppError, LoadFailure, RecordError, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, PipelineConfig};
pub use crate::constants::{
    DEALS_PUBLISHER_ID, DEFAULT_CATALOG_URL, DEFAULT_SOURCES_URL, HISTORY_WINDOW,
};

// --- Domain Model ---
pub use crate::model::{
    Card, CardVisitor, ContentItem, ContentType, GroupAxis, PublisherSource, ScoredItem,
    SourceRegistry,
};

// --- Domain Types ---
pub use crate::types::{
    BaseDomain, FeedResource, ItemId, PublishTime, PublisherId, RenderedDeck, ResourceLocator,
    ValidatedUrl,
};

// --- Feed Retrieval ---
pub use crate::api::{
    client::ApiResponse,
    parser::{decode_catalog, parse_catalog_response, parse_sources_response},
    FeedClient, FeedHttpClient, FeedRepository, LossyDecode,
};

// --- History ---
pub use crate::history::{
    visited_domains, FileHistory, HistoryProvider, NoHistory, StaticHistory, VisitedDomains,
};

// --- Ranking and Layout ---
pub use crate::composing::{compose_cards, SubPool, SubPools};
pub use crate::ranking::{rank_items, recency_score, score_item};

// --- Load Orchestration ---
pub use crate::loader::{
    Clock, FeedLoader, FeedSnapshot, LoadOutcome, LoadReport, LoadState, StageFailure,
};

// --- Output ---
pub use crate::analytics::{measure_cards, DeckSummary};
pub use crate::formatting::{render_deck, DeckFormat, DEFAULT_TEXT_TEMPLATE};
pub use crate::output::{deliver, plan_delivery, DeliveryTarget, OutputPlan, OutputReport};

// --- Pipeline Traits ---
pub use crate::pipeline::{DeckDelivery, DeckRenderer, FeedSource};
