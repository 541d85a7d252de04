use serde::{Deserialize, Serialize};

use super::movie::Genre;

/// Account role; ADMIN unlocks the review editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::User => write!(f, "User"),
        }
    }
}

/// Session descriptor returned by login and credential renewal.
///
/// `token` / `refresh_token` are opaque references for display and
/// bookkeeping; the secrets the server actually honors travel in HTTP-only
/// cookies managed by the request client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct UserResponse {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub favourite_genres: Option<Vec<Genre>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub favourite_genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct LogoutRequest {
    pub user_id: String,
}

/// Body for PATCH /movie/{imdb_id}/review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ReviewPatch {
    pub admin_review: String,
}

/// Outcome of a review update: the server re-ranks the movie from the text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ReviewUpdate {
    pub ranking_name: String,
    pub admin_review: String,
}

/// Generic `{"message": "..."}` envelope used by logout and register
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Message {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_response() {
        let json = r#"{
            "user_id": "64f1b2c3d4e5f60718293a4b",
            "first_name": "Ann",
            "last_name": "Example",
            "email": "ann@example.com",
            "role": "ADMIN",
            "token": "c1",
            "refresh_token": "r1",
            "favourite_genres": [{"genre_id": 28, "genre_name": "Action"}]
        }"#;
        let user: UserResponse = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.token, "c1");
        assert_eq!(user.favourite_genres.as_ref().map(|g| g.len()), Some(1));
    }

    #[test]
    fn test_role_defaults_to_user() {
        let json = r#"{
            "user_id": "u1",
            "first_name": "Ann",
            "last_name": "Example",
            "email": "ann@example.com"
        }"#;
        let user: UserResponse = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(user.token.is_empty());
    }

    #[test]
    fn test_role_wire_format_is_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::from_str::<Role>("\"USER\"").unwrap(), Role::User);
    }
}
