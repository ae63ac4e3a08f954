//! Networking constants shared by the quote source and the client.
use std::time::Duration;

/// Endpoint returning `{ "quotes": [...] }`.
pub const QUOTES_URL: &str = "https://dummyjson.com/quotes";
/// How often the controller refreshes on its own.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);
/// Upper bound on a single GET, connect included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
