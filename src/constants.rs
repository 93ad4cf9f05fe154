//! Endpoint paths and defaults for the MailHog HTTP API.

/// Base URL of a MailHog instance running with its default settings.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8025";

/// User agent sent with every request unless overridden.
pub const USER_AGENT_VALUE: &str = concat!("mailhog-client/", env!("CARGO_PKG_VERSION"));

/// Paged message listing (v2).
pub const MESSAGES_PATH: &str = "/api/v2/messages";
/// Single message lookup and deletion (v1). Without an id, deletes everything.
pub const MESSAGE_PATH: &str = "/api/v1/messages";
/// Message search (v2).
pub const SEARCH_PATH: &str = "/api/v2/search";

pub const SEARCH_FROM: &str = "from";
pub const SEARCH_TO: &str = "to";
pub const SEARCH_CONTAINING: &str = "containing";
