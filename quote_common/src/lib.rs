//!
//! Common types shared by the quote client and its tests.
//!
//! This crate aggregates:
//! - `error` — the `FetchError` taxonomy; any variant means "the fetch failed".
//! - `result` — handy `Result<T, FetchError>` alias.
//! - `model` — the `Quote` record and the endpoint's response envelope.
//! - `source` — the `QuoteSource` trait and its HTTP implementation.
//! - `config` — internal defaults for the source and the refresh controller.
//! - `net` — endpoint URL and timing constants.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod model;
pub mod net;
pub mod result;
pub mod source;

pub use config::{ControllerConfig, SourceConfig};
pub use error::FetchError;
pub use model::Quote;
pub use result::Result;
pub use source::{HttpQuoteSource, QuoteSource};
