//! Renewal-aware client for the protected endpoints.
//!
//! Protected requests go through `AuthedClient`, which watches for the
//! server's 401 on an established session, renews the credentials once via
//! the refresh endpoint, and retries the original request once. A failed
//! renewal signs the user out locally and surfaces the original error.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::{Session, SessionStore};
use crate::models::{Movie, ReviewPatch, ReviewUpdate};

use super::{ApiClient, ApiError};

/// Request pipeline for endpoints behind the auth middleware.
/// Cheap to clone; handles share the HTTP client (and its cookie store) and
/// observe the live session store at call time.
#[derive(Clone)]
pub struct AuthedClient {
    api: ApiClient,
    store: SessionStore,
}

impl AuthedClient {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// GET with one renewal + one retry on an expired session
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        match self.api.get(path).await {
            Err(ApiError::Unauthorized) if self.signed_in() => {
                if self.renew().await {
                    self.api.get(path).await
                } else {
                    Err(ApiError::Unauthorized)
                }
            }
            outcome => outcome,
        }
    }

    /// POST with one renewal + one retry on an expired session
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        match self.api.post(path, body).await {
            Err(ApiError::Unauthorized) if self.signed_in() => {
                if self.renew().await {
                    self.api.post(path, body).await
                } else {
                    Err(ApiError::Unauthorized)
                }
            }
            outcome => outcome,
        }
    }

    /// PATCH with one renewal + one retry on an expired session
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        match self.api.patch(path, body).await {
            Err(ApiError::Unauthorized) if self.signed_in() => {
                if self.renew().await {
                    self.api.patch(path, body).await
                } else {
                    Err(ApiError::Unauthorized)
                }
            }
            outcome => outcome,
        }
    }

    /// A 401 without a session is plain "not signed in", not an expiry;
    /// those pass through without touching the refresh endpoint.
    fn signed_in(&self) -> bool {
        self.store.current().is_some()
    }

    /// One renewal attempt. Success installs the refreshed descriptor
    /// through the store's write path when the server returned one; a
    /// message-only answer keeps the current descriptor (the rotated
    /// cookies are what matter). Failure signs the user out locally.
    /// Never called twice for the same request.
    async fn renew(&self) -> bool {
        match self.api.refresh_session().await {
            Ok(Some(user)) => {
                debug!(user_id = %user.user_id, "Session renewed, retrying request");
                self.store.set(Some(Session::from_user(user)));
                true
            }
            Ok(None) => {
                debug!("Session renewed, cookies rotated, retrying request");
                true
            }
            Err(e) => {
                warn!(error = %e, "Session renewal failed, signing out");
                self.store.set(None);
                false
            }
        }
    }

    // ===== Protected endpoints =====

    /// Movies recommended from the account's favourite genres
    pub async fn fetch_recommended(&self) -> Result<Vec<Movie>, ApiError> {
        self.get("/recommendedMovies").await
    }

    /// Full record for one movie
    pub async fn fetch_movie(&self, imdb_id: &str) -> Result<Movie, ApiError> {
        self.get(&format!("/movie/{}", imdb_id)).await
    }

    /// Replace the admin review; the server re-ranks the movie from the
    /// review's sentiment and returns the outcome. ADMIN role only.
    pub async fn update_admin_review(
        &self,
        imdb_id: &str,
        review: &str,
    ) -> Result<ReviewUpdate, ApiError> {
        let body = ReviewPatch {
            admin_review: review.to_string(),
        };
        self.patch(&format!("/movie/{}/review", imdb_id), &body).await
    }
}
