// src/pipeline.rs
//! Pipeline capability traits: abstract the three stages of a feed run.
//!
//! Each trait describes a single capability so each stage can be tested alone.

use crate::error::AppError;
use crate::loader::FeedSnapshot;
use crate::output::OutputReport;
use crate::types::RenderedDeck;
use std::sync::Arc;

/// Produces the snapshot of one load cycle.
#[async_trait::async_trait]
pub trait FeedSource {
    async fn fetch(&self) -> Result<Arc<FeedSnapshot>, AppError>;
}

/// Turns a snapshot into its rendered form.
pub trait DeckRenderer {
    fn render(&self, snapshot: &FeedSnapshot) -> Result<RenderedDeck, AppError>;
}

/// Delivers a rendered deck to its destinations.
pub trait DeckDelivery {
    fn deliver(&self, deck: RenderedDeck) -> Result<OutputReport, AppError>;
}
