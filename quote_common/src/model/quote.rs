//! Quote payload returned by the quotes endpoint.
//!
//! The endpoint answers with a JSON envelope `{ "quotes": [ { "id", "quote", "author" }, ... ] }`
//! (plus paging fields we ignore). The envelope is decoded with `serde_json` and one element is
//! picked at random.
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::result::Result;

/// One quotation. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Identifier, unique within one response.
    pub id: u64,
    /// The quotation itself (`quote` on the wire).
    #[serde(rename = "quote")]
    pub text: String,
    /// Who said it.
    pub author: String,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{201c}{}\u{201d} - {}", self.text, self.author)
    }
}

/// Response envelope of the quotes endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    /// Quotes contained in this page.
    pub quotes: Vec<Quote>,
}

impl QuoteResponse {
    /// Decode a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Consume the envelope and return one quote chosen uniformly at random.
    ///
    /// An empty list is a `FetchError::EmptyResult`.
    pub fn into_random<R: Rng + ?Sized>(mut self, rng: &mut R) -> Result<Quote> {
        if self.quotes.is_empty() {
            return Err(FetchError::EmptyResult);
        }
        let index = rng.random_range(0..self.quotes.len());
        Ok(self.quotes.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BODY: &str = r#"{
        "quotes": [
            {"id": 1, "quote": "Your heart is the size of an ocean.", "author": "Rumi"},
            {"id": 2, "quote": "The Blues ain't nothing but a good man feeling bad.", "author": "Leon Redbone"},
            {"id": 3, "quote": "Be yourself; everyone else is already taken.", "author": "Oscar Wilde"}
        ],
        "total": 1454,
        "skip": 0,
        "limit": 30
    }"#;

    #[test]
    fn decodes_the_endpoint_shape() {
        let response = QuoteResponse::from_slice(BODY.as_bytes()).unwrap();
        assert_eq!(response.quotes.len(), 3);
        assert_eq!(
            response.quotes[0],
            Quote {
                id: 1,
                text: "Your heart is the size of an ocean.".into(),
                author: "Rumi".into(),
            }
        );
    }

    #[test]
    fn random_pick_is_always_an_unchanged_element() {
        let expected = QuoteResponse::from_slice(BODY.as_bytes()).unwrap().quotes;
        for seed in 0..64 {
            let response = QuoteResponse::from_slice(BODY.as_bytes()).unwrap();
            let picked = response.into_random(&mut StdRng::seed_from_u64(seed)).unwrap();
            assert!(expected.contains(&picked), "seed {seed} produced {picked:?}");
        }
    }

    #[test]
    fn random_pick_reaches_every_element() {
        let mut seen = std::collections::HashSet::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let response = QuoteResponse::from_slice(BODY.as_bytes()).unwrap();
            seen.insert(response.into_random(&mut rng).unwrap().id);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn empty_list_is_an_empty_result() {
        let response = QuoteResponse::from_slice(br#"{"quotes": []}"#).unwrap();
        let err = response.into_random(&mut rand::rng()).unwrap_err();
        assert!(matches!(err, FetchError::EmptyResult));
    }

    #[test]
    fn schema_mismatch_is_a_decode_error() {
        let bodies: [&[u8]; 3] = [
            b"<html>oops</html>",
            br#"{"items": []}"#,
            br#"{"quotes": [{"id": "one", "quote": "x", "author": "y"}]}"#,
        ];
        for body in bodies {
            let err = QuoteResponse::from_slice(body).unwrap_err();
            assert!(matches!(err, FetchError::Decode(_)));
        }
    }

    #[test]
    fn display_wraps_text_in_quotes() {
        let quote = Quote {
            id: 9,
            text: "Stay hungry.".into(),
            author: "Steve Jobs".into(),
        };
        assert_eq!(quote.to_string(), "\u{201c}Stay hungry.\u{201d} - Steve Jobs");
    }
}
