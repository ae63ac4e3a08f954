//! Data model types returned by the quotes endpoint.
//!
//! - `quote` — a single quotation and the response envelope that carries the list.
pub mod quote;

pub use quote::{Quote, QuoteResponse};
