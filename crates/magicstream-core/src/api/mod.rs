//! REST API client module for the Magic Stream server.
//!
//! This module provides the `ApiClient` for the public endpoints (login,
//! register, catalog) and the `AuthedClient` wrapper that adds transparent
//! credential renewal for the protected ones.
//!
//! The API authenticates with JWTs carried in HTTP-only cookies; the
//! clients here never read the tokens themselves, they only observe the
//! server's verdicts.

pub mod authed;
pub mod client;
pub mod error;

pub use authed::AuthedClient;
pub use client::ApiClient;
pub use error::ApiError;
