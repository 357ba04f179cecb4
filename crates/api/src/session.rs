//! Session context and its on-disk store.
//!
//! A [`SessionContext`] is created once per process and passed by reference
//! to whatever needs to know who is signed in. It is populated by
//! [`SessionContext::sign_in`] after the backend confirms a token, and
//! emptied by [`SessionContext::sign_out`]. Nothing reads credentials from
//! ambient global state.
//!
//! [`SessionStore`] persists the signed-in session between CLI invocations.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use stitchhouse_core::{Role, UserId};

use crate::error::ApiError;

/// The account a token belongs to, as reported by `GET /api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(alias = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// A bearer token together with the account it authenticates.
#[derive(Clone)]
pub struct Session {
    token: SecretString,
    user: AuthUser,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    #[must_use]
    pub const fn new(token: SecretString, user: AuthUser) -> Self {
        Self { token, user }
    }

    #[must_use]
    pub const fn user(&self) -> &AuthUser {
        &self.user
    }

    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    /// Value for the `Authorization` header.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }
}

/// Process-wide "who is signed in" state.
#[derive(Debug, Default)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    /// A signed-out context.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Replace the current session.
    pub fn sign_in(&mut self, session: Session) {
        tracing::info!(user_id = %session.user.id, role = %session.user.role, "signed in");
        self.current = Some(session);
    }

    /// Forget the current session.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.current.take() {
            tracing::info!(user_id = %session.user.id, "signed out");
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The current session, or [`ApiError::Unauthenticated`].
    ///
    /// # Errors
    ///
    /// Returns an error if nobody is signed in.
    pub fn require(&self) -> Result<&Session, ApiError> {
        self.current.as_ref().ok_or(ApiError::Unauthenticated)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(Session::is_admin)
    }
}

// =============================================================================
// Store
// =============================================================================

/// Serialized form written by [`SessionStore`].
#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user: AuthUser,
}

/// JSON file holding the last signed-in session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, if any.
    ///
    /// A missing file is not an error. A file that cannot be parsed is
    /// discarded with a warning, since it can only come from an older build
    /// or manual editing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub async fn load(&self) -> Result<Option<Session>, ApiError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<StoredSession>(&contents) {
            Ok(stored) => Ok(Some(Session::new(
                SecretString::from(stored.token),
                stored.user,
            ))),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    /// Persist `session`, replacing any previous one.
    ///
    /// The file holds the bearer token in plain text, so on unix it is
    /// written with mode `0600`, including when it already existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, session: &Session) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let stored = StoredSession {
            token: session.token.expose_secret().to_string(),
            user: session.user.clone(),
        };
        let json = serde_json::to_vec_pretty(&stored)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_private(&self.path, &json).await?;
        Ok(())
    }

    /// Delete the stored session. Succeeds if there was none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub async fn clear(&self) -> Result<(), ApiError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    use tokio::io::AsyncWriteExt;

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .await?;
    // `mode` only applies to newly created files.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))
        .await?;
    file.write_all(contents).await?;
    file.flush().await
}

#[cfg(not(unix))]
async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(path, contents).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    pub(crate) fn user(role: Role) -> AuthUser {
        AuthUser {
            id: UserId::new("u1"),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut ctx = SessionContext::new();
        assert!(matches!(ctx.require(), Err(ApiError::Unauthenticated)));
        assert!(!ctx.is_admin());

        ctx.sign_in(Session::new(SecretString::from("tok"), user(Role::Admin)));
        assert!(ctx.is_admin());
        assert_eq!(ctx.require().unwrap().bearer(), "Bearer tok");

        ctx.sign_out();
        assert!(ctx.current().is_none());
    }

    #[test]
    fn test_customer_is_not_admin() {
        let mut ctx = SessionContext::new();
        ctx.sign_in(Session::new(SecretString::from("tok"), user(Role::User)));
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new(SecretString::from("very-secret-token"), user(Role::User));
        let debug = format!("{session:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("very-secret-token"));
    }

    #[tokio::test]
    async fn test_store_round_trip_and_clear() {
        let dir = std::env::temp_dir().join(format!("stitchhouse-session-{}", uuid::Uuid::new_v4()));
        let store = SessionStore::new(dir.join("nested").join("session.json"));

        assert!(store.load().await.unwrap().is_none());

        store
            .save(&Session::new(SecretString::from("tok-123"), user(Role::Admin)))
            .await
            .unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.token().expose_secret(), "tok-123");
        assert_eq!(loaded.user().role, Role::Admin);

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_store_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = std::env::temp_dir().join(format!("stitchhouse-mode-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"{}").await.unwrap();
        tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644))
            .await
            .unwrap();

        SessionStore::new(&path)
            .save(&Session::new(SecretString::from("tok-123"), user(Role::User)))
            .await
            .unwrap();

        let mode = tokio::fs::metadata(&path).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_ignores_garbage() {
        let path = std::env::temp_dir().join(format!("stitchhouse-garbage-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"{not json").await.unwrap();
        assert!(SessionStore::new(&path).load().await.unwrap().is_none());
        tokio::fs::remove_file(&path).await.unwrap();
    }
}
