//! Client for the Modulbank business banking API.
//!
//! [`Client`] issues the requests, [`model`] holds the typed values it
//! returns and [`wire`] the JSON shapes the bank actually exchanges.
pub mod client;
pub mod model;
pub mod transport;
pub mod wire;

pub use client::{Client, ClientError, ClientOptions};

#[cfg(test)]
use rstest_reuse;
