//! Network access to the dae GraphQL endpoint.

mod client;

pub use client::*;
