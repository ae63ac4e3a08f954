//! Fetching random quotes.
//!
//! `QuoteSource` is the seam the refresh controller depends on. `HttpQuoteSource` is the
//! production implementation: one GET against the quotes endpoint, decode the envelope,
//! pick one element at random. There is no retry here; the caller decides what a failure
//! means.
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::SourceConfig;
use crate::error::FetchError;
use crate::model::{Quote, QuoteResponse};
use crate::result::Result;

/// Something that can hand out one random quote per call.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the list of quotes and return one of them.
    async fn fetch_random_quote(&self) -> Result<Quote>;
}

/// Quote source backed by an HTTP GET to a JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    client: Client,
    config: SourceConfig,
}

impl HttpQuoteSource {
    /// Build a source with its own HTTP client using the configured timeout.
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Build a source around an already configured client.
    ///
    /// `config.timeout` is not applied to `client`.
    pub fn with_client(client: Client, config: SourceConfig) -> Self {
        Self { client, config }
    }

    /// Endpoint this source queries.
    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch_random_quote(&self) -> Result<Quote> {
        debug!("GET {}", self.config.url);
        let response = self.client.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let envelope = QuoteResponse::from_slice(&body)?;
        debug!("Received {} quotes from {}", envelope.quotes.len(), self.config.url);

        envelope.into_random(&mut rand::rng())
    }
}
