// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story
//! of how a feed is loaded, ranked and laid out.

// ---------------------------------------------------------------------------
// Feed endpoints
// ---------------------------------------------------------------------------

/// Default location of the publisher registry.
pub const DEFAULT_SOURCES_URL: &str = "https://brave-today-cdn.brave.com/sources.json";

/// Default location of the content catalog.
pub const DEFAULT_CATALOG_URL: &str = "https://brave-today-cdn.brave.com/brave-today/feed.json";

/// Environment variable overriding the registry locator.
pub const SOURCES_URL_ENV: &str = "CARDFEED_SOURCES_URL";

/// Environment variable overriding the catalog locator.
pub const CATALOG_URL_ENV: &str = "CARDFEED_CATALOG_URL";

/// HTTP timeout applied to each feed request unless configured otherwise.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Date format of `publish_time` in the catalog. Always UTC.
pub const PUBLISH_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// How many recent history entries feed the visited-domain set.
pub const HISTORY_WINDOW: usize = 200;

/// Upper bound accepted for `--history-window`.
pub const HISTORY_WINDOW_MAX: u32 = 10_000;

/// Subtracted from the score of items whose domain the user has visited.
/// Lower scores rank first, so this pulls familiar sources forward.
pub const VISITED_DOMAIN_PENALTY: f64 = 5.0;

// ---------------------------------------------------------------------------
// Layout recipe
// ---------------------------------------------------------------------------

/// Publisher whose items fill the deals groups.
pub const DEALS_PUBLISHER_ID: &str = "brave_offers";

/// Title of every deals group card.
pub const DEALS_GROUP_TITLE: &str = "Deals";

/// Items taken from the deals pool for each deals group.
pub const DEALS_PER_GROUP: usize = 3;

/// Articles consumed by the headline block (two headlines, two pairs).
pub const HEADLINE_BLOCK_SIZE: usize = 6;

/// Maximum articles shown in the category group.
pub const CATEGORY_GROUP_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
