//! Client-side routes and the access guard.
//!
//! The route table mirrors the platform's web client: browsing and account
//! entry are public, anything personalized sits behind authentication. The
//! guard is pure derived state over a route and the session store; acting
//! on its verdict (redirecting, rendering a placeholder) is the shell's
//! job.

use crate::auth::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Recommended,
    Review(String),
    Stream(String),
}

impl Route {
    /// Parse an absolute path into a route
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.strip_prefix('/')?;
        let mut parts = trimmed.split('/').filter(|s| !s.is_empty());
        let route = match (parts.next(), parts.next()) {
            (None, _) => Route::Home,
            (Some("login"), None) => Route::Login,
            (Some("register"), None) => Route::Register,
            (Some("recommended"), None) => Route::Recommended,
            (Some("review"), Some(id)) => Route::Review(id.to_string()),
            (Some("stream"), Some(id)) => Route::Stream(id.to_string()),
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Recommended => "/recommended".to_string(),
            Route::Review(id) => format!("/review/{}", id),
            Route::Stream(id) => format!("/stream/{}", id),
        }
    }

    /// Screen title for the header bar
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Browse",
            Route::Login => "Sign In",
            Route::Register => "Create Account",
            Route::Recommended => "Recommended",
            Route::Review(_) => "Review",
            Route::Stream(_) => "Stream",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Recommended | Route::Review(_) | Route::Stream(_)
        )
    }

    /// Access verdict for this route against the current session state.
    /// Pure: no I/O, no store mutation.
    pub fn access(&self, store: &SessionStore) -> Access {
        if !self.requires_auth() {
            return Access::Authorized;
        }
        if store.is_loading() {
            return Access::Pending;
        }
        if store.is_authenticated() {
            Access::Authorized
        } else {
            Access::Unauthorized
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Outcome of guarding a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Session store still hydrating; protected content must not render yet
    Pending,
    Authorized,
    /// Signed out; the shell bounces to the login screen
    Unauthorized,
}
