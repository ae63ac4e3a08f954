//! Data model types owned by the client.
//!
//! - `state` — the `FetchState` projection published to display surfaces.
pub mod state;

pub use state::FetchState;
