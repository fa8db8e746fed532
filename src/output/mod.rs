// src/output/mod.rs
//! Delivery of a rendered deck, split into planning and execution.
//!
//! `plan_delivery` decides where a deck goes without touching the
//! filesystem; `deliver` performs the writes and reports each one.

mod types;
mod writer;

pub use types::{CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport};
pub use writer::deliver;

use crate::types::RenderedDeck;
use std::path::Path;

/// Plans delivery of a deck: a file write when a path is given, stdout when
/// piping or when no file was requested.
pub fn plan_delivery(deck: &RenderedDeck, output_file: Option<&Path>, pipe: bool) -> OutputPlan {
    let mut plan = OutputPlan::new();

    if let Some(path) = output_file {
        plan = plan.with_operation(DeliveryTarget::WriteFile {
            path: path.to_path_buf(),
            content: deck.as_str().to_string(),
        });
    }

    if pipe || output_file.is_none() {
        plan = plan.with_operation(DeliveryTarget::PrintToStdout {
            content: deck.as_str().to_string(),
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn deck() -> RenderedDeck {
        RenderedDeck::new("cards\n".to_string())
    }

    #[test]
    fn test_no_file_prints_to_stdout() {
        let plan = plan_delivery(&deck(), None, false);
        assert_eq!(plan.operations.len(), 1);
        assert!(matches!(plan.operations[0], DeliveryTarget::PrintToStdout { .. }));
    }

    #[test]
    fn test_file_only_when_not_piping() {
        let plan = plan_delivery(&deck(), Some(Path::new("out/deck.json")), false);
        assert_eq!(plan.operations.len(), 1);
        match &plan.operations[0] {
            DeliveryTarget::WriteFile { path, content } => {
                assert_eq!(path, &PathBuf::from("out/deck.json"));
                assert_eq!(content, "cards\n");
            }
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn test_file_and_pipe() {
        let plan = plan_delivery(&deck(), Some(Path::new("deck.json")), true);
        assert_eq!(plan.operations.len(), 2);
        assert!(matches!(plan.operations[1], DeliveryTarget::PrintToStdout { .. }));
    }
}
