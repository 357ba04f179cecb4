//! Session establishment from a bearer token.

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::ApiClient;
use crate::decode;
use crate::error::ApiError;
use crate::session::{AuthUser, Session};

impl ApiClient {
    /// Ask the backend who `token` belongs to.
    ///
    /// # Errors
    ///
    /// Returns `Backend` (usually 401) for a rejected token and
    /// `MalformedResponse` when the body has no `user`.
    #[instrument(skip(self, token))]
    pub async fn current_user(&self, token: &SecretString) -> Result<AuthUser, ApiError> {
        let url = self.endpoint("/api/auth/me")?;
        let request = self
            .get(url)
            .bearer_auth(token.expose_secret());
        let body = self.send(decode::AUTH_ME, request).await?;
        decode::auth_user(body)
    }

    /// Build a [`Session`] for `token` by resolving its account.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::current_user`].
    pub async fn authenticate(&self, token: SecretString) -> Result<Session, ApiError> {
        let user = self.current_user(&token).await?;
        Ok(Session::new(token, user))
    }
}
