use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Genre, Role, UserResponse};

/// Session snapshot file name in the data directory
const SESSION_FILE: &str = "user.json";

/// The authenticated identity.
///
/// `credential` is the opaque reference the server returned alongside the
/// HTTP-only auth cookies. The cookie secrets themselves live in the request
/// client's cookie store and never pass through here.
#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub credential: String,
    #[serde(default)]
    pub favourite_genres: Vec<Genre>,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a login or renewal response
    pub fn from_user(user: UserResponse) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            credential: user.token,
            favourite_genres: user.favourite_genres.unwrap_or_default(),
            logged_in_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// Keep the credential reference out of logs
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("credential", &"[REDACTED]")
            .finish()
    }
}

struct StoreInner {
    data_dir: PathBuf,
    session: Option<Session>,
    loading: bool,
}

/// Owner of the signed-in identity.
///
/// The store starts in the `loading` state until [`hydrate`](Self::hydrate)
/// has read (or failed to read) the on-disk snapshot. All mutation goes
/// through [`set`](Self::set), which keeps memory and the snapshot file in
/// step. Handles are cheap to clone and share one inner state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl SessionStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                data_dir,
                session: None,
                loading: true,
            })),
        }
    }

    /// Restore the session from the snapshot file, then leave the loading
    /// state.
    ///
    /// A missing snapshot is the normal signed-out case. An unreadable or
    /// unparseable snapshot is logged and treated as absent; hydration never
    /// fails the program.
    pub fn hydrate(&self) {
        let path = self.read().data_dir.join(SESSION_FILE);
        let restored = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Session>(&contents) {
                Ok(session) => {
                    debug!(user_id = %session.user_id, "Restored session snapshot");
                    Some(session)
                }
                Err(e) => {
                    warn!(error = %e, "Session snapshot unreadable, starting signed out");
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No session snapshot found");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read session snapshot, starting signed out");
                None
            }
        };

        let mut inner = self.write();
        inner.session = restored;
        inner.loading = false;
    }

    /// The single write path for session state.
    ///
    /// `Some` installs the session and persists the snapshot; `None` signs
    /// out and deletes it. Until hydration has completed only the in-memory
    /// state is touched, so a half-initialized store can never clobber the
    /// snapshot on disk.
    pub fn set(&self, session: Option<Session>) {
        let mut inner = self.write();
        inner.session = session;
        if inner.loading {
            debug!("Session store not hydrated yet, skipping persistence");
            return;
        }

        let path = inner.data_dir.join(SESSION_FILE);
        let outcome = match &inner.session {
            Some(session) => persist_snapshot(&path, session),
            None => remove_snapshot(&path),
        };
        if let Err(e) = outcome {
            warn!(error = %e, "Session snapshot update failed");
        }
    }

    /// Copy of the current session; never touches disk
    pub fn current(&self) -> Option<Session> {
        self.read().session.clone()
    }

    /// True until `hydrate` has run
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Hydrated and signed in
    pub fn is_authenticated(&self) -> bool {
        let inner = self.read();
        !inner.loading && inner.session.is_some()
    }

    pub fn user_id(&self) -> Option<String> {
        self.read().session.as_ref().map(|s| s.user_id.clone())
    }

    pub fn display_name(&self) -> Option<String> {
        self.read().session.as_ref().map(|s| s.first_name.clone())
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn persist_snapshot(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create data directory")?;
    }
    let contents =
        serde_json::to_string_pretty(session).context("Failed to serialize session")?;
    std::fs::write(path, contents).context("Failed to write session snapshot")?;

    // Snapshot holds account identity; keep it owner-readable only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .context("Failed to set snapshot permissions")?;
    }

    Ok(())
}

fn remove_snapshot(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove session snapshot"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            user_id: "u1".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Example".to_string(),
            email: "ann@example.com".to_string(),
            role: Role::User,
            credential: "c1".to_string(),
            favourite_genres: vec![],
            logged_in_at: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        store.hydrate();
        store.set(Some(sample_session()));

        let restored = SessionStore::new(dir.path().to_path_buf());
        restored.hydrate();
        let session = restored.current().unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.credential, "c1");
        assert!(!restored.is_loading());
    }

    #[test]
    fn test_sign_out_removes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        store.hydrate();
        store.set(Some(sample_session()));
        assert!(dir.path().join(SESSION_FILE).exists());

        store.set(None);
        assert!(!dir.path().join(SESSION_FILE).exists());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_starts_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "not json{").unwrap();

        let store = SessionStore::new(dir.path().to_path_buf());
        store.hydrate();
        assert!(store.current().is_none());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_no_persistence_before_hydration() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        store.set(Some(sample_session()));
        assert!(!dir.path().join(SESSION_FILE).exists());
        assert!(store.is_loading());
    }

    #[test]
    fn test_handles_share_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        store.hydrate();

        let handle = store.clone();
        handle.set(Some(sample_session()));
        assert_eq!(store.user_id().as_deref(), Some("u1"));
        assert_eq!(store.display_name().as_deref(), Some("Ann"));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let debugged = format!("{:?}", sample_session());
        assert!(debugged.contains("[REDACTED]"));
        assert!(!debugged.contains("c1"));
    }
}
