//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Keep logged upstream bodies bounded
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Longest upstream body excerpt written to logs, in characters.
pub const LOG_SNIPPET_CHARS: usize = 512;

/// Install the global tracing subscriber.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "chat_insights_gateway={level},tower_http=debug",
            level = config.log_level
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Trim `body` to at most `LOG_SNIPPET_CHARS` characters on a char boundary.
pub fn truncate_for_log(body: &str) -> &str {
    match body.char_indices().nth(LOG_SNIPPET_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
