//! HTTP transport: plain and bearer-authenticated clients.

mod auth;
mod client;

pub use auth::{build_auth_header, AuthHeader};
pub use client::{ApiClient, HttpClientFactory, TransportError};
