//! Observable state of the refresh controller.
use chrono::{DateTime, Utc};
use quote_common::Quote;

/// What a display surface renders from.
///
/// Published by `RefreshController` after every change; consumers get it through a
/// `tokio::sync::watch` receiver or a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    /// Last successfully fetched quote, if any fetch succeeded yet.
    pub current_quote: Option<Quote>,
    /// True while at least one fetch-and-apply cycle is in flight.
    pub is_loading: bool,
    /// When `current_quote` was applied.
    pub last_updated: Option<DateTime<Utc>>,
    /// Message of the most recent failure, cleared by the next success.
    ///
    /// Diagnostics only; a failure never replaces the displayed quote.
    pub last_error: Option<String>,
}

impl FetchState {
    /// True until the first successful fetch.
    pub fn is_empty(&self) -> bool {
        self.current_quote.is_none()
    }
}
