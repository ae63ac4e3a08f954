//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `FetchError`, so fetch code can simply return `Result<T>`.
use crate::error::FetchError;

/// Workspace-wide `Result` alias with `FetchError` as the default error.
pub type Result<T, E = FetchError> = std::result::Result<T, E>;
