// src/config.rs
use crate::constants::{
    CATALOG_URL_ENV, DEFAULT_CATALOG_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_SOURCES_URL,
    HISTORY_WINDOW, HISTORY_WINDOW_MAX, SOURCES_URL_ENV,
};
use crate::error::AppError;
use crate::formatting::DeckFormat;
use crate::types::{ResourceLocator, ValidationError};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const MAX_HTTP_TIMEOUT_SECS: u64 = 600;

/// Parsed command-line input.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Source registry location: an http(s) URL, a file:// URL or a local path
    #[arg(long)]
    pub sources: Option<String>,

    /// Catalog location: an http(s) URL, a file:// URL or a local path
    #[arg(long)]
    pub catalog: Option<String>,

    /// File of recently visited URLs, one per line, most recent first
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Number of history entries used for personalization
    #[arg(long, default_value_t = HISTORY_WINDOW as u32)]
    pub history_window: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = DeckFormat::Json)]
    pub format: DeckFormat,

    /// Handlebars template for text output (overrides the built-in layout)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Write the rendered deck to this file
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Pipe mode - also print the deck to stdout when writing a file
    #[arg(short = 'p', long, default_value_t = false)]
    pub pipe: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub timeout: u64,
}

/// Resolved configuration for one feed run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub sources: ResourceLocator,
    pub catalog: ResourceLocator,
    pub history: Option<PathBuf>,
    pub history_window: usize,
    pub format: DeckFormat,
    pub template: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub pipe: bool,
    pub verbose: bool,
    pub http_timeout: Duration,
}

impl PipelineConfig {
    /// Resolves configuration from CLI input and the process environment.
    ///
    /// Locators come from the command line first, then the environment,
    /// then the built-in defaults.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Like [`PipelineConfig::resolve`], reading variables through `lookup`.
    pub fn resolve_with<F>(cli: CommandLineInput, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sources = locate(cli.sources, &lookup, SOURCES_URL_ENV, DEFAULT_SOURCES_URL)?;
        let catalog = locate(cli.catalog, &lookup, CATALOG_URL_ENV, DEFAULT_CATALOG_URL)?;

        if cli.history_window > HISTORY_WINDOW_MAX {
            return Err(ValidationError::OutOfBounds {
                value: cli.history_window,
                min: 0,
                max: HISTORY_WINDOW_MAX,
            }
            .into());
        }

        if cli.timeout == 0 || cli.timeout > MAX_HTTP_TIMEOUT_SECS {
            return Err(ValidationError::OutOfBounds {
                value: u32::try_from(cli.timeout).unwrap_or(u32::MAX),
                min: 1,
                max: MAX_HTTP_TIMEOUT_SECS as u32,
            }
            .into());
        }

        if let Some(template) = &cli.template {
            if cli.format != DeckFormat::Text {
                log::warn!(
                    "Template {} is ignored unless --format text is used",
                    template.display()
                );
            }
        }

        Ok(PipelineConfig {
            sources,
            catalog,
            history: cli.history,
            history_window: cli.history_window as usize,
            format: cli.format,
            template: cli.template,
            output_file: cli.output_file,
            pipe: cli.pipe,
            verbose: cli.verbose,
            http_timeout: Duration::from_secs(cli.timeout),
        })
    }
}

fn locate<F>(
    flag: Option<String>,
    lookup: &F,
    env_key: &str,
    default: &str,
) -> Result<ResourceLocator, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = flag
        .or_else(|| lookup(env_key).filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| default.to_string());

    ResourceLocator::parse(&raw).map_err(|e| {
        AppError::MissingConfiguration(format!("Invalid location '{}' ({}): {}", raw, env_key, e))
    })
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sources: default_locator(DEFAULT_SOURCES_URL),
            catalog: default_locator(DEFAULT_CATALOG_URL),
            history: None,
            history_window: HISTORY_WINDOW,
            format: DeckFormat::Json,
            template: None,
            output_file: None,
            pipe: false,
            verbose: false,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

fn default_locator(url: &str) -> ResourceLocator {
    ResourceLocator::parse(url).unwrap_or_else(|_| ResourceLocator::Local(PathBuf::from(url)))
}
