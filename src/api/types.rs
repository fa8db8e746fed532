// src/api/types.rs
//! Type definitions for the feed API module.

use crate::error::RecordError;

/// Outcome of decoding a payload whose records fail independently.
///
/// Survivors keep their payload order; every dropped record leaves a
/// `RecordError` behind so callers can count and log losses.
#[derive(Debug, Clone, PartialEq)]
pub struct LossyDecode<T> {
    pub items: Vec<T>,
    pub rejected: Vec<RecordError>,
}

impl<T> LossyDecode<T> {
    pub fn new(items: Vec<T>, rejected: Vec<RecordError>) -> Self {
        Self { items, rejected }
    }

    /// Number of records that were dropped.
    pub fn dropped(&self) -> usize {
        self.rejected.len()
    }

    /// Total records seen in the payload.
    pub fn total(&self) -> usize {
        self.items.len() + self.rejected.len()
    }
}

impl<T> Default for LossyDecode<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            rejected: Vec::new(),
        }
    }
}
