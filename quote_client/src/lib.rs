//!
//! Quote Client library: the refresh controller and the terminal display surface.
//!
//! - `controller` — `RefreshController`, which runs fetch-and-apply cycles on start, on a
//!   fixed timer and on demand.
//! - `model` — `FetchState`, the projection display surfaces render from.
//! - `display` — terminal rendering and the stdin-driven event loop.
//! - `args` — command-line arguments of the binary.
//! - `error` — fatal errors of the binary.
#![warn(missing_docs)]
pub mod args;
pub mod controller;
pub mod display;
pub mod error;
pub mod model;

pub use controller::RefreshController;
pub use error::ClientError;
pub use model::FetchState;
