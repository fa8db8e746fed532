// src/output/writer.rs
//! Executes delivery plans. The only place deck output touches I/O.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Performs every operation in the plan, recording failures instead of
/// stopping at the first one.
pub fn deliver(plan: OutputPlan) -> Result<OutputReport, AppError> {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::info!("Delivering deck to {} targets", plan.operations.len());

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation) {
            Ok(bytes_written) => {
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                    duration_ms: op_start.elapsed().as_millis() as u64,
                });
            }
            Err(e) => {
                log::error!("Delivery to {} failed: {}", operation, e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

    log::info!(
        "Delivery complete: {} succeeded, {} failed in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.total_duration_ms
    );

    Ok(report)
}

fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            print_to_stdout(content)?;
            Ok(content.len())
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_file_and_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deck.json");
        let plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: path.clone(),
            content: "[]".to_string(),
        });

        let report = deliver(plan).unwrap();
        assert!(report.is_success());
        assert_eq!(report.stats.bytes_written, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(report.written_files().collect::<Vec<_>>(), vec![&path]);
    }

    #[test]
    fn test_failure_is_recorded_not_raised() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();

        let plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: blocker.join("deck.json"),
            content: "[]".to_string(),
        });

        let report = deliver(plan).unwrap();
        assert!(!report.is_success());
        assert_eq!(report.stats.operations_failed, 1);
        assert_eq!(report.failed.len(), 1);
    }
}
