//! Internal configuration for the quote source and the refresh controller.
//!
//! None of these values are read from the command line, files or the
//! environment: the defaults are the production values. Tests construct
//! non-default configs to point at local servers or shorten intervals.
use std::time::Duration;

use crate::net::{QUOTES_URL, REFRESH_INTERVAL, REQUEST_TIMEOUT};

/// Where and how the HTTP source fetches quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Full URL of the quotes endpoint.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: QUOTES_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Scheduling behaviour of the refresh controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Period of the automatic refresh timer.
    pub refresh_interval: Duration,
    /// Drop results of cycles that were started before an already applied one.
    ///
    /// Off by default: the last cycle to complete wins.
    pub discard_stale: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            refresh_interval: REFRESH_INTERVAL,
            discard_stale: false,
        }
    }
}
