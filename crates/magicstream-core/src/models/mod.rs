//! Data models for Magic Stream entities.
//!
//! This module contains the wire types exchanged with the Magic Stream
//! API, matching the server's JSON field names:
//!
//! - `Movie`, `Genre`, `Ranking`: catalog entries and their sentiment rank
//! - `Role`, `UserResponse`: account identity as returned by login/renewal
//! - Request payloads: `LoginRequest`, `RegisterRequest`, `LogoutRequest`,
//!   `ReviewPatch`
//! - Small response envelopes: `ReviewUpdate`, `Message`
//!
//! With the `ts` feature enabled the wire types derive `ts_rs::TS` so the
//! platform's web client can consume the same shapes.

pub mod movie;
pub mod user;

pub use movie::{Genre, Movie, Ranking};
pub use user::{
    LoginRequest, LogoutRequest, Message, RegisterRequest, ReviewPatch, ReviewUpdate, Role,
    UserResponse,
};
