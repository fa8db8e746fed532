// src/main.rs

use cardfeed::{
    deliver, measure_cards, plan_delivery, render_deck, AppError, CommandLineInput, DeckDelivery,
    DeckRenderer, DeliveryTarget, FeedClient, FeedLoader, FeedSnapshot, FeedSource, FileHistory,
    HistoryProvider, NoHistory, OutputReport, PipelineConfig, RenderedDeck,
};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Sets up logging configuration.
///
/// Console logs go to stderr so a deck printed to stdout stays clean.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("cardfeed.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes one feed run: load → render → deliver.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let run = FeedRun::new(config);

    let snapshot = run.fetch().await?;
    let deck = run.render(&snapshot)?;
    let report = run.deliver(deck)?;
    run.report_completion(&snapshot, &report);

    Ok(())
}

/// Loads one feed, renders it and delivers it to the configured outputs.
struct FeedRun<'a> {
    config: &'a PipelineConfig,
}

impl<'a> FeedRun<'a> {
    fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    fn history(&self) -> Arc<dyn HistoryProvider> {
        match &self.config.history {
            Some(path) => {
                log::info!("Personalizing with history from {}", path.display());
                Arc::new(FileHistory::new(path.clone()))
            }
            None => Arc::new(NoHistory),
        }
    }

    /// Reports completion on stderr; stdout is reserved for the deck.
    fn report_completion(&self, snapshot: &FeedSnapshot, report: &OutputReport) {
        if let Some(failed) = &snapshot.report.failure {
            eprintln!(
                "⚠️  Could not load the {}: {}. No cards were produced.",
                failed.resource, failed.failure
            );
        }

        if snapshot.report.records_dropped > 0 {
            eprintln!(
                "⚠️  Skipped {} malformed catalog records.",
                snapshot.report.records_dropped
            );
        }

        if self.config.pipe {
            return;
        }

        let summary = measure_cards(&snapshot.cards);
        eprintln!(
            "📰 Composed {} cards showing {} of {} items from {} publishers.",
            summary.total_cards,
            summary.items_shown,
            snapshot.report.items_decoded,
            snapshot.sources.len()
        );

        for completed in &report.completed {
            if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
                eprintln!("✓ Deck saved to {}", path.display());
            }
        }
    }
}

#[async_trait::async_trait]
impl FeedSource for FeedRun<'_> {
    async fn fetch(&self) -> Result<Arc<FeedSnapshot>, AppError> {
        log::info!(
            "Loading feed from {} and {}",
            self.config.sources,
            self.config.catalog
        );

        let repository = Arc::new(FeedClient::from_config(self.config)?);
        let loader = Arc::new(
            FeedLoader::new(repository, self.history())
                .with_history_window(self.config.history_window),
        );

        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted, cancelling feed load");
                interrupt.cancel();
            }
        });

        loader
            .spawn_load(cancel)
            .await
            .map_err(|_| AppError::InternalError {
                message: "Feed load task ended without reporting".to_string(),
                source: None,
            })?
    }
}

impl DeckRenderer for FeedRun<'_> {
    fn render(&self, snapshot: &FeedSnapshot) -> Result<RenderedDeck, AppError> {
        render_deck(
            snapshot,
            self.config.format,
            self.config.template.as_deref(),
        )
    }
}

impl DeckDelivery for FeedRun<'_> {
    fn deliver(&self, deck: RenderedDeck) -> Result<OutputReport, AppError> {
        let plan = plan_delivery(&deck, self.config.output_file.as_deref(), self.config.pipe);
        let report = deliver(plan)?;

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failed.iter().map(|f| f.error.clone()).collect(),
            });
        }

        Ok(report)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
