//! Authentication module for managing the signed-in session and credentials.
//!
//! This module provides:
//! - `Session` / `SessionStore`: the signed-in identity, hydrated from and
//!   snapshotted to disk, with all mutation funneled through one write path
//! - `CredentialStore`: optional remember-me password storage via the OS
//!   keychain
//!
//! The server transports the actual auth secrets as HTTP-only cookies; the
//! session here carries identity plus an opaque credential reference only.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{Session, SessionStore};
