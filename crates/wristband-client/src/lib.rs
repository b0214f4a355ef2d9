//! Client for the wristband rally server.
//!
//! The rally server tracks participants by the tag identifier on their
//! wristband. This crate registers emails against tags, and also covers
//! the tag registration, flag collection and statistics endpoints.

mod client;
mod error;
mod transport;
mod types;

pub use client::RallyClient;
pub use error::RallyError;
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use types::*;
