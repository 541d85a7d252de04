//! HTTP client for the Magic Stream REST API.
//!
//! This module provides the `ApiClient` struct for talking to the server's
//! public endpoints. Credentials travel as HTTP-only cookies held in the
//! client's cookie store, so request code never handles raw secrets; the
//! renewal-aware wrapper for protected endpoints lives in
//! [`super::authed`].

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{Genre, LoginRequest, LogoutRequest, Message, Movie, RegisterRequest, UserResponse};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for Magic Stream.
/// Clone is cheap - reqwest::Client uses Arc internally, and cloned handles
/// share the connection pool and the cookie store.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given origin.
    ///
    /// The cookie store is what carries the `access_token` / `refresh_token`
    /// cookies the server issues at login and rotates at renewal.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if a response is successful, mapping the status and body into
    /// the error taxonomy if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse_json<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON from {}: {}", url, e))
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;
        Self::parse_json(&url, response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.client.post(&url).json(body).send().await?;
        let response = Self::check_response(response).await?;
        Self::parse_json(&url, response).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.client.patch(&url).json(body).send().await?;
        let response = Self::check_response(response).await?;
        Self::parse_json(&url, response).await
    }

    // ===== Account endpoints =====

    /// Sign in. The server sets both auth cookies on success; the returned
    /// descriptor carries the identity for the session store.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserResponse, ApiError> {
        debug!(email = %email, "Logging in");
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/login", &request).await
    }

    /// Create an account; the server answers 409 for an already-registered
    /// email.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Message, ApiError> {
        debug!(email = %request.email, "Registering account");
        self.post("/register", request).await
    }

    /// Server-side sign out: clears the auth cookies for this client.
    /// Callers treat failures as non-fatal; local sign-out must not depend
    /// on the server being reachable.
    pub async fn logout(&self, user_id: &str) -> Result<Message, ApiError> {
        debug!(user_id = %user_id, "Logging out");
        let request = LogoutRequest {
            user_id: user_id.to_string(),
        };
        self.post("/user/logout", &request).await
    }

    /// Renew the auth cookies from the refresh cookie; 401 means the refresh
    /// credential itself expired.
    ///
    /// The server rotates both cookies and answers with a plain message
    /// envelope; some deployments return a refreshed session descriptor
    /// instead. `None` means "renewed, keep the current descriptor" - the
    /// rotated secrets already live in the cookie store.
    pub async fn refresh_session(&self) -> Result<Option<UserResponse>, ApiError> {
        debug!("Renewing session credentials");
        let url = self.url("/user/refresh-token");
        let response = self.client.post(&url).send().await?;
        let response = Self::check_response(response).await?;
        let text = response.text().await?;

        if let Ok(user) = serde_json::from_str::<UserResponse>(&text) {
            return Ok(Some(user));
        }
        serde_json::from_str::<Message>(&text)
            .map(|_| None)
            .map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse JSON from {}: {}", url, e))
            })
    }

    // ===== Catalog endpoints =====

    /// Fetch the public movie catalog
    pub async fn fetch_movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.get("/movies").await
    }

    /// Fetch the genre list (used by the registration form)
    pub async fn fetch_genres(&self) -> Result<Vec<Genre>, ApiError> {
        self.get("/genres").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/movies"), "http://localhost:8080/movies");
    }

    #[test]
    fn test_url_joins_paths() {
        let client = ApiClient::new("https://api.magicstream.example").unwrap();
        assert_eq!(
            client.url("/movie/tt0111161/review"),
            "https://api.magicstream.example/movie/tt0111161/review"
        );
    }
}
