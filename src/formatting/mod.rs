// src/formatting/mod.rs
//! Renders a feed snapshot for delivery.
//!
//! JSON output is the snapshot itself. Text output runs the card deck
//! through a Handlebars template, either the built-in one or a file given
//! on the command line.

use crate::analytics::measure_cards;
use crate::error::AppError;
use crate::loader::FeedSnapshot;
use crate::model::{Card, ContentItem, GroupAxis};
use crate::types::RenderedDeck;
use clap::ValueEnum;
use handlebars::Handlebars;
use serde_json::{json, Value};
use std::path::Path;

const TEXT_TEMPLATE_NAME: &str = "deck";

/// Default layout for `--format text`.
pub const DEFAULT_TEXT_TEMPLATE: &str = "\
{{#each cards}}
{{position}}. [{{kind}}]{{#if title}} {{title}}{{/if}}{{#if axis}} ({{axis}}){{/if}}
{{#each items}}
   - {{title}}{{#if publisher}} | {{publisher}}{{/if}}{{#if category}} | {{category}}{{/if}}
{{#if url}}
     {{url}}
{{/if}}
{{/each}}
{{else}}
No cards.
{{/each}}
{{summary.total_cards}} cards, {{summary.items_shown}} items, {{publishers}} publishers
{{#if failure}}
Load failed: {{failure}}
{{/if}}
";

/// How a snapshot is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DeckFormat {
    /// Pretty-printed JSON of the full snapshot
    #[default]
    Json,
    /// Human-readable listing rendered through a Handlebars template
    Text,
}

/// Renders a snapshot in the requested format.
pub fn render_deck(
    snapshot: &FeedSnapshot,
    format: DeckFormat,
    template: Option<&Path>,
) -> Result<RenderedDeck, AppError> {
    let rendered = match format {
        DeckFormat::Json => render_json(snapshot)?,
        DeckFormat::Text => render_text(snapshot, template)?,
    };
    log::info!(
        "Rendered {} cards as {:?} ({} bytes)",
        snapshot.cards.len(),
        format,
        rendered.len()
    );
    Ok(rendered)
}

fn render_json(snapshot: &FeedSnapshot) -> Result<RenderedDeck, AppError> {
    let mut body = serde_json::to_string_pretty(snapshot)?;
    body.push('\n');
    Ok(RenderedDeck::new(body))
}

fn render_text(snapshot: &FeedSnapshot, template: Option<&Path>) -> Result<RenderedDeck, AppError> {
    let engine = load_template(template)?;
    let data = template_data(snapshot);
    let body = engine
        .render(TEXT_TEMPLATE_NAME, &data)
        .map_err(|e| AppError::TemplateRenderError {
            name: template
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| TEXT_TEMPLATE_NAME.to_string()),
            message: e.to_string(),
        })?;
    Ok(RenderedDeck::new(body))
}

/// Loads and registers the text template, built-in unless a path is given.
fn load_template(path: Option<&Path>) -> Result<Handlebars<'static>, AppError> {
    let source = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| AppError::TemplateNotFound {
            path: path.display().to_string(),
            source: e,
        })?,
        None => DEFAULT_TEXT_TEMPLATE.to_string(),
    };

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string(TEXT_TEMPLATE_NAME, source)
        .map_err(|e| AppError::TemplateRenderError {
            name: TEXT_TEMPLATE_NAME.to_string(),
            message: e.to_string(),
        })?;

    Ok(handlebars)
}

/// Flattens a snapshot into the shape the text template reads.
fn template_data(snapshot: &FeedSnapshot) -> Value {
    let cards: Vec<Value> = snapshot
        .cards
        .iter()
        .enumerate()
        .map(|(index, card)| card_data(index + 1, card))
        .collect();

    json!({
        "cards": cards,
        "summary": measure_cards(&snapshot.cards),
        "publishers": snapshot.sources.len(),
        "failure": snapshot.report.failure.as_ref().map(|f| format!("{} ({})", f.resource, f.failure)),
    })
}

fn card_data(position: usize, card: &Card) -> Value {
    let axis = match card {
        Card::Group { axis, .. } => Some(match axis {
            GroupAxis::Horizontal => "horizontal",
            GroupAxis::Vertical => "vertical",
        }),
        _ => None,
    };

    json!({
        "position": position,
        "kind": card.kind(),
        "title": card.title(),
        "axis": axis,
        "items": card.items().iter().map(item_data).collect::<Vec<_>>(),
    })
}

fn item_data(item: &ContentItem) -> Value {
    json!({
        "id": item.id.as_str(),
        "title": item.title,
        "publisher": item.publisher_name.as_deref().unwrap_or(item.publisher_id.as_str()),
        "category": item.category,
        "url": item.url.as_ref().map(|u| u.as_str()),
        "published": item.publish_time.to_string(),
        "type": item.content_type.to_string(),
    })
}
