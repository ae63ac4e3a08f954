//! Error types used by the Quote Client binary.
//!
//! `ClientError` covers the few things that can actually end the program: terminal
//! I/O and failing to set up the quote source. Fetch failures during normal operation
//! never reach it; the controller logs and swallows them.
use std::io;

use quote_common::FetchError;
use thiserror::Error;

/// Fatal error of the client application.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Reading stdin or writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The quote source could not be set up.
    #[error("Quote source error: {0}")]
    Source(#[from] FetchError),
}
