//! Application state and logic for the Magic Stream TUI.
//!
//! `App` owns the session store, both API clients and all per-screen state.
//! Input handlers mutate it, the render pass reads it, and background
//! fetches report back through an mpsc channel drained once per frame.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use magicstream_core::models::{Genre, Movie, RegisterRequest, Role};
use magicstream_core::{
    Access, ApiClient, ApiError, AuthedClient, Config, CredentialStore, Route, Session,
    SessionStore,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background fetch channel
pub const CHANNEL_BUFFER_SIZE: usize = 32;

/// Number of rows to jump on PageUp/PageDown
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Maximum length for text form fields (names, email)
pub const MAX_FIELD_LENGTH: usize = 64;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for an admin review
pub const MAX_REVIEW_LENGTH: usize = 500;

/// Environment variable for pre-filling the login email (development convenience)
pub const EMAIL_ENV: &str = "MAGICSTREAM_EMAIL";

/// Environment variable for pre-filling the login password (development convenience)
pub const PASSWORD_ENV: &str = "MAGICSTREAM_PASSWORD";

// ============================================================================
// Enums
// ============================================================================

/// Application UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Normal operation
    Normal,
    /// Showing the help overlay
    ShowingHelp,
    /// Waiting for quit confirmation
    ConfirmingQuit,
    /// Shutting down
    Quitting,
}

/// Which panel has focus on the list screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
}

/// Focus within the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Remember,
    Button,
}

/// Focus within the register form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFocus {
    FirstName,
    LastName,
    Email,
    Password,
    Genres,
    Button,
}

/// Result of a background fetch, delivered over the app channel
pub enum FetchResult {
    /// The public catalog listing
    Movies(Vec<Movie>),
    /// Personalized picks for the signed-in user
    Recommended(Vec<Movie>),
    /// Genre list, used by the register form and movie labels
    Genres(Vec<Genre>),
    /// Detail for the movie open on the review or stream screen
    MovieDetail(Box<Movie>),
    /// A protected fetch failed and renewal could not save it
    SessionExpired,
    /// A fetch failed with a displayable message
    Failed(String),
}

// ============================================================================
// App
// ============================================================================

/// Central application state
pub struct App {
    // Configuration and persistence
    pub config: Config,
    pub store: SessionStore,

    // API clients; `authed` wraps a clone of `api` and shares its cookie jar
    pub api: ApiClient,
    pub authed: AuthedClient,

    // Navigation
    pub route: Route,
    pub state: AppState,
    pub focus: Focus,
    /// Where to land after a successful sign-in
    pub pending_route: Option<Route>,
    /// The list screen to return to from the review and stream screens
    pub last_list: Route,

    // Catalog data
    pub movies: Vec<Movie>,
    pub recommended: Vec<Movie>,
    pub genres: Vec<Genre>,
    pub current_movie: Option<Movie>,

    // List selections
    pub browse_selection: usize,
    pub recommended_selection: usize,

    // Login form
    pub login_email: String,
    pub login_password: String,
    pub login_remember: bool,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Register form
    pub register_first_name: String,
    pub register_last_name: String,
    pub register_email: String,
    pub register_password: String,
    pub register_genres: Vec<Genre>,
    pub register_genre_cursor: usize,
    pub register_focus: RegisterFocus,
    pub register_error: Option<String>,

    // Review editor
    pub review_draft: String,

    // Status
    pub status_message: Option<String>,
    pub pending_fetches: usize,

    // Background fetch channel
    fetch_tx: mpsc::Sender<FetchResult>,
    fetch_rx: mpsc::Receiver<FetchResult>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = config.data_dir()?;
        let store = SessionStore::new(data_dir);
        store.hydrate();

        let api = ApiClient::new(&config.base_url())?;
        let authed = AuthedClient::new(api.clone(), store.clone());

        let (fetch_tx, fetch_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Email prefill: environment first, then the last signed-in account
        let login_email = std::env::var(EMAIL_ENV)
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();
        let login_password = std::env::var(PASSWORD_ENV).unwrap_or_default();
        let login_focus = if login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };

        Ok(Self {
            config,
            store,
            api,
            authed,
            route: Route::Home,
            state: AppState::Normal,
            focus: Focus::List,
            pending_route: None,
            last_list: Route::Home,
            movies: Vec::new(),
            recommended: Vec::new(),
            genres: Vec::new(),
            current_movie: None,
            browse_selection: 0,
            recommended_selection: 0,
            login_email,
            login_password,
            login_remember: false,
            login_focus,
            login_error: None,
            register_first_name: String::new(),
            register_last_name: String::new(),
            register_email: String::new(),
            register_password: String::new(),
            register_genres: Vec::new(),
            register_genre_cursor: 0,
            register_focus: RegisterFocus::FirstName,
            register_error: None,
            review_draft: String::new(),
            status_message: None,
            pending_fetches: 0,
            fetch_tx,
            fetch_rx,
        })
    }

    // ------------------------------------------------------------------------
    // Session helpers
    // ------------------------------------------------------------------------

    pub fn signed_in(&self) -> bool {
        self.store.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.store.current().map(|s| s.is_admin()).unwrap_or(false)
    }

    /// Label for the status bar, e.g. "Ada Lovelace [admin]" or "Signed out".
    pub fn session_label(&self) -> String {
        match self.store.current() {
            Some(session) => {
                let name = format!("{} {}", session.first_name, session.last_name);
                if session.is_admin() {
                    format!("{} [admin]", name)
                } else {
                    name
                }
            }
            None => "Signed out".to_string(),
        }
    }

    /// Re-establish cookie credentials for a hydrated session using the
    /// password saved in the keyring, if any. A fresh process has no
    /// cookies, so without this the first protected request would go
    /// through the renewal path and fail.
    pub async fn restore_credentials(&mut self) {
        let Some(session) = self.store.current() else {
            return;
        };
        let password = match CredentialStore::get_password(&session.email) {
            Ok(password) => password,
            Err(_) => return,
        };
        match self.api.login(&session.email, &password).await {
            Ok(user) => {
                debug!(email = %session.email, "Restored credentials from keyring");
                self.store.set(Some(Session::from_user(user)));
            }
            Err(e) => {
                warn!(error = %e, "Stored credentials were not accepted");
            }
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Move to a route, bouncing to the login screen when the route is
    /// protected and no session is present. The requested destination is
    /// kept so a successful sign-in can finish the journey.
    pub fn navigate(&mut self, route: Route) {
        match route.access(&self.store) {
            Access::Authorized => {
                if matches!(route, Route::Home | Route::Recommended) {
                    self.last_list = route.clone();
                }
                self.route = route;
                self.focus = Focus::List;
                self.status_message = None;
                self.activate_route();
            }
            Access::Pending => {
                // Snapshot still loading; hold the destination rather than
                // guessing at the outcome
                self.pending_route = Some(route);
            }
            Access::Unauthorized => {
                self.pending_route = Some(route);
                self.enter_login();
                self.route = Route::Login;
                self.status_message = Some("Sign in to continue".to_string());
            }
        }
    }

    /// Kick off the data loads a screen needs when it becomes active.
    fn activate_route(&mut self) {
        match self.route.clone() {
            Route::Home => {
                if self.movies.is_empty() {
                    self.fetch_movies();
                }
                if self.genres.is_empty() {
                    self.fetch_genres();
                }
            }
            Route::Recommended => self.fetch_recommended(),
            Route::Review(imdb_id) | Route::Stream(imdb_id) => {
                self.current_movie = None;
                self.review_draft.clear();
                self.fetch_movie(&imdb_id);
            }
            Route::Login => self.enter_login(),
            Route::Register => {
                self.register_error = None;
                if self.genres.is_empty() {
                    self.fetch_genres();
                }
            }
        }
    }

    fn enter_login(&mut self) {
        self.login_error = None;
        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };
    }

    /// The movie highlighted on the current list screen, if any.
    pub fn selected_movie(&self) -> Option<&Movie> {
        match self.route {
            Route::Home => self.movies.get(self.browse_selection),
            Route::Recommended => self.recommended.get(self.recommended_selection),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Background fetches
    // ------------------------------------------------------------------------

    /// Reload the data behind the current screen.
    pub fn refresh_current(&mut self) {
        match self.route.clone() {
            Route::Home => {
                self.fetch_movies();
                self.fetch_genres();
            }
            Route::Recommended => self.fetch_recommended(),
            Route::Review(imdb_id) | Route::Stream(imdb_id) => self.fetch_movie(&imdb_id),
            Route::Login | Route::Register => {}
        }
    }

    fn fetch_movies(&mut self) {
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        self.pending_fetches += 1;
        tokio::spawn(async move {
            let result = match api.fetch_movies().await {
                Ok(movies) => FetchResult::Movies(movies),
                Err(e) => FetchResult::Failed(format!("Could not load movies: {}", e)),
            };
            let _ = tx.send(result).await;
        });
    }

    fn fetch_genres(&mut self) {
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        self.pending_fetches += 1;
        tokio::spawn(async move {
            let result = match api.fetch_genres().await {
                Ok(genres) => FetchResult::Genres(genres),
                Err(e) => FetchResult::Failed(format!("Could not load genres: {}", e)),
            };
            let _ = tx.send(result).await;
        });
    }

    fn fetch_recommended(&mut self) {
        let authed = self.authed.clone();
        let tx = self.fetch_tx.clone();
        self.pending_fetches += 1;
        tokio::spawn(async move {
            let result = match authed.fetch_recommended().await {
                Ok(movies) => FetchResult::Recommended(movies),
                Err(ApiError::Unauthorized) => FetchResult::SessionExpired,
                Err(e) => FetchResult::Failed(format!("Could not load recommendations: {}", e)),
            };
            let _ = tx.send(result).await;
        });
    }

    fn fetch_movie(&mut self, imdb_id: &str) {
        let authed = self.authed.clone();
        let tx = self.fetch_tx.clone();
        let imdb_id = imdb_id.to_string();
        self.pending_fetches += 1;
        tokio::spawn(async move {
            let result = match authed.fetch_movie(&imdb_id).await {
                Ok(movie) => FetchResult::MovieDetail(Box::new(movie)),
                Err(ApiError::Unauthorized) => FetchResult::SessionExpired,
                Err(e) => FetchResult::Failed(format!("Could not load movie: {}", e)),
            };
            let _ = tx.send(result).await;
        });
    }

    /// Drain completed background fetches and fold them into screen state.
    pub async fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.fetch_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.pending_fetches = self.pending_fetches.saturating_sub(1);
            self.apply_fetch_result(result);
        }
    }

    fn apply_fetch_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Movies(movies) => {
                self.movies = movies;
                self.browse_selection = self
                    .browse_selection
                    .min(self.movies.len().saturating_sub(1));
            }
            FetchResult::Recommended(movies) => {
                self.recommended = movies;
                self.recommended_selection = self
                    .recommended_selection
                    .min(self.recommended.len().saturating_sub(1));
            }
            FetchResult::Genres(genres) => {
                self.genres = genres;
                self.register_genre_cursor = 0;
            }
            FetchResult::MovieDetail(movie) => {
                // Prime the review editor with the saved review
                self.review_draft = movie.admin_review.clone().unwrap_or_default();
                self.current_movie = Some(*movie);
            }
            FetchResult::SessionExpired => {
                // The request pipeline already cleared the session; send
                // the user back through the login screen
                self.recommended.clear();
                self.pending_route = Some(self.route.clone());
                self.enter_login();
                self.login_error = Some("Your session expired. Please sign in again.".to_string());
                self.route = Route::Login;
            }
            FetchResult::Failed(message) => {
                warn!("Background fetch failed: {}", message);
                self.status_message = Some(message);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Auth actions
    // ------------------------------------------------------------------------

    /// Submit the login form. Returns true when a session was established.
    pub async fn attempt_login(&mut self) -> bool {
        let email = self.login_email.trim().to_string();
        if email.is_empty() || self.login_password.is_empty() {
            self.login_error = Some("Email and password are required".to_string());
            return false;
        }

        match self.api.login(&email, &self.login_password).await {
            Ok(user) => {
                info!(email = %email, "Signed in");
                self.store.set(Some(Session::from_user(user)));

                if self.login_remember {
                    if let Err(e) = CredentialStore::store(&email, &self.login_password) {
                        warn!(error = %e, "Failed to save password to keyring");
                    }
                }

                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.login_password.clear();
                self.login_error = None;

                let destination = self.pending_route.take().unwrap_or(Route::Home);
                self.navigate(destination);
                self.status_message = Some("Signed in".to_string());
                true
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.login_error = Some(login_error_message(&e));
                false
            }
        }
    }

    /// Submit the registration form. Returns true when the account was created.
    pub async fn attempt_register(&mut self) -> bool {
        let first = self.register_first_name.trim().to_string();
        let last = self.register_last_name.trim().to_string();
        let email = self.register_email.trim().to_string();
        if first.is_empty() || last.is_empty() || email.is_empty() || self.register_password.is_empty()
        {
            self.register_error = Some("All fields are required".to_string());
            return false;
        }

        let request = RegisterRequest {
            first_name: first,
            last_name: last,
            email: email.clone(),
            password: self.register_password.clone(),
            role: Role::User,
            favourite_genres: self.register_genres.clone(),
        };

        match self.api.register(&request).await {
            Ok(_) => {
                info!(email = %email, "Account created");
                self.login_email = email;
                self.login_password.clear();
                self.register_password.clear();
                self.register_error = None;
                self.navigate(Route::Login);
                self.status_message = Some("Account created. Sign in to continue.".to_string());
                true
            }
            Err(ApiError::Conflict(_)) => {
                self.register_error =
                    Some("An account with that email already exists".to_string());
                false
            }
            Err(ApiError::NetworkError(_)) => {
                self.register_error = Some("Cannot reach the server. Is it running?".to_string());
                false
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                self.register_error = Some(format!("Registration failed: {}", e));
                false
            }
        }
    }

    /// Sign out. The server call is best effort; local state is always
    /// cleared and the app lands on the login screen.
    pub async fn logout(&mut self) {
        if let Some(user_id) = self.store.user_id() {
            if let Err(e) = self.api.logout(&user_id).await {
                warn!(error = %e, "Logout request failed; clearing local session anyway");
            }
        }

        self.store.set(None);
        self.recommended.clear();
        self.current_movie = None;
        self.pending_route = None;
        self.enter_login();
        self.route = Route::Login;
        self.status_message = Some("Signed out".to_string());
    }

    // ------------------------------------------------------------------------
    // Register form helpers
    // ------------------------------------------------------------------------

    /// Toggle the genre under the cursor in the register form.
    pub fn toggle_register_genre(&mut self) {
        let Some(genre) = self.genres.get(self.register_genre_cursor) else {
            return;
        };
        if let Some(pos) = self
            .register_genres
            .iter()
            .position(|g| g.genre_id == genre.genre_id)
        {
            self.register_genres.remove(pos);
        } else {
            self.register_genres.push(genre.clone());
        }
    }

    pub fn genre_picked(&self, genre_id: i32) -> bool {
        self.register_genres.iter().any(|g| g.genre_id == genre_id)
    }

    // ------------------------------------------------------------------------
    // Review editor
    // ------------------------------------------------------------------------

    /// Save the review draft for the movie on the review screen. The server
    /// recomputes the sentiment ranking from the text, so the movie is
    /// refetched afterwards to pick it up.
    pub async fn save_review(&mut self) {
        let Route::Review(imdb_id) = self.route.clone() else {
            return;
        };

        if !self.is_admin() {
            self.status_message = Some("Admin access is required to edit reviews".to_string());
            return;
        }

        let draft = self.review_draft.trim().to_string();
        if draft.is_empty() {
            self.status_message = Some("Review text is empty".to_string());
            return;
        }

        match self.authed.update_admin_review(&imdb_id, &draft).await {
            Ok(update) => {
                self.status_message =
                    Some(format!("Review saved. Rated \"{}\"", update.ranking_name));
                self.fetch_movie(&imdb_id);
            }
            Err(ApiError::Unauthorized) => {
                self.pending_route = Some(self.route.clone());
                self.enter_login();
                self.login_error = Some("Your session expired. Please sign in again.".to_string());
                self.route = Route::Login;
            }
            Err(ApiError::AccessDenied(_)) => {
                self.status_message =
                    Some("The server rejected the update: admin access required".to_string());
            }
            Err(e) => {
                warn!(error = %e, "Review update failed");
                self.status_message = Some(format!("Could not save review: {}", e));
            }
        }
    }
}

// ============================================================================
// Input validation helpers
// ============================================================================

fn is_valid_input_char(c: char) -> bool {
    // Allow printable text, reject control chars
    !c.is_control()
}

/// Check if a form field character should be accepted
pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Check if a review character should be accepted
pub fn can_add_review_char(current_len: usize, c: char) -> bool {
    current_len < MAX_REVIEW_LENGTH && is_valid_input_char(c)
}

/// Map an API error to a message fit for the login screen.
fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Invalid email or password".to_string(),
        ApiError::NetworkError(_) => "Cannot reach the server. Is it running?".to_string(),
        ApiError::ServerError(_) => "The server had a problem. Try again shortly.".to_string(),
        other => format!("Sign in failed: {}", other),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use magicstream_core::models::UserResponse;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str, dir: &tempfile::TempDir) -> Config {
        Config {
            api_base_url: Some(base_url.to_string()),
            last_email: None,
            data_dir: Some(dir.path().to_path_buf()),
        }
    }

    fn test_app(base_url: &str) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(test_config(base_url, &dir)).unwrap();
        (app, dir)
    }

    fn session_fixture() -> Session {
        Session::from_user(UserResponse {
            user_id: "user-1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::User,
            token: "ref-1".to_string(),
            refresh_token: String::new(),
            favourite_genres: None,
        })
    }

    #[test]
    fn test_input_length_guards() {
        assert!(can_add_field_char(0, 'a'));
        assert!(can_add_field_char(MAX_FIELD_LENGTH - 1, 'z'));
        assert!(!can_add_field_char(MAX_FIELD_LENGTH, 'a'));
        assert!(!can_add_field_char(0, '\n'));
        assert!(!can_add_field_char(0, '\t'));

        assert!(can_add_password_char(0, ' '));
        assert!(!can_add_password_char(MAX_PASSWORD_LENGTH, 'a'));

        assert!(can_add_review_char(MAX_REVIEW_LENGTH - 1, '.'));
        assert!(!can_add_review_char(MAX_REVIEW_LENGTH, '.'));
    }

    #[test]
    fn test_login_error_messages() {
        assert_eq!(
            login_error_message(&ApiError::Unauthorized),
            "Invalid email or password"
        );
        assert_eq!(
            login_error_message(&ApiError::ServerError("boom".to_string())),
            "The server had a problem. Try again shortly."
        );
    }

    #[test]
    fn test_navigate_bounces_to_login_and_stashes_destination() {
        let (mut app, _dir) = test_app("http://127.0.0.1:9");

        app.navigate(Route::Review("tt0111161".to_string()));

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.pending_route, Some(Route::Review("tt0111161".to_string())));
    }

    #[test]
    fn test_toggle_register_genre() {
        let (mut app, _dir) = test_app("http://127.0.0.1:9");
        app.genres = vec![
            Genre {
                genre_id: 1,
                genre_name: "Drama".to_string(),
            },
            Genre {
                genre_id: 2,
                genre_name: "Sci-Fi".to_string(),
            },
        ];

        app.register_genre_cursor = 1;
        app.toggle_register_genre();
        assert!(app.genre_picked(2));
        assert!(!app.genre_picked(1));

        app.toggle_register_genre();
        assert!(!app.genre_picked(2));
    }

    #[test]
    fn test_session_label() {
        let (app, _dir) = test_app("http://127.0.0.1:9");
        assert_eq!(app.session_label(), "Signed out");

        app.store.set(Some(session_fixture()));
        assert_eq!(app.session_label(), "Ada Lovelace");
    }

    #[test]
    fn test_expired_fetch_result_returns_to_login() {
        let (mut app, _dir) = test_app("http://127.0.0.1:9");
        app.store.set(Some(session_fixture()));
        app.route = Route::Recommended;

        // What the fetch task reports after the pipeline gave up
        app.store.set(None);
        app.apply_fetch_result(FetchResult::SessionExpired);

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.pending_route, Some(Route::Recommended));
        assert!(app.login_error.is_some());
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_server_is_unreachable() {
        // Nothing listens on this port, so the logout POST fails
        let (mut app, _dir) = test_app("http://127.0.0.1:9");
        app.store.set(Some(session_fixture()));
        app.route = Route::Recommended;

        app.logout().await;

        assert!(app.store.current().is_none());
        assert_eq!(app.route, Route::Login);
        assert!(app.recommended.is_empty());
    }

    #[tokio::test]
    async fn test_login_lands_on_stashed_destination() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user_id": "user-1",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "role": "USER",
                "token": "ref-1",
                "refresh_token": "",
                "favourite_genres": null
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/recommendedMovies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let (mut app, _dir) = test_app(&server.uri());

        // Bounce off a protected route, then sign in
        app.navigate(Route::Recommended);
        assert_eq!(app.route, Route::Login);

        app.login_email = "ada@example.com".to_string();
        app.login_password = "correct-horse".to_string();
        assert!(app.attempt_login().await);

        assert_eq!(app.route, Route::Recommended);
        assert!(app.pending_route.is_none());
        assert!(app.signed_in());
    }

    #[tokio::test]
    async fn test_rejected_login_stays_on_login_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": "invalid email or password"})),
            )
            .mount(&server)
            .await;

        let (mut app, _dir) = test_app(&server.uri());
        app.navigate(Route::Login);
        app.login_email = "ada@example.com".to_string();
        app.login_password = "wrong".to_string();

        assert!(!app.attempt_login().await);

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.login_error.as_deref(), Some("Invalid email or password"));
        assert!(!app.signed_in());
    }
}
