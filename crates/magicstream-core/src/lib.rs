//! Core library for the Magic Stream terminal client.
//!
//! Everything the UI shells need to talk to the Magic Stream platform:
//!
//! - `api`: HTTP clients for the REST API, including transparent credential
//!   renewal for protected endpoints
//! - `auth`: the session store (hydration, snapshot, single write path) and
//!   keychain-backed remember-me
//! - `models`: wire types matching the server JSON
//! - `routes`: the client route table and the access guard
//! - `config`: on-disk configuration and directory resolution

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;

pub use api::{ApiClient, ApiError, AuthedClient};
pub use auth::{CredentialStore, Session, SessionStore};
pub use config::Config;
pub use routes::{Access, Route};
