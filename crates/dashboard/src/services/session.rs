//! Current-user session persisted through the storage port.
//!
//! Holds exactly one signed-in user and an opaque token under the
//! `finai_auth_token`/`finai_auth_user` keys. There is no expiry and no
//! server-side validation: a token is valid while it is stored.

use crate::db::RepositoryError;
use crate::models::{User, UserPatch};
use crate::storage::{SharedStorage, keys};

/// Session store over the storage port.
#[derive(Clone)]
pub struct SessionStore {
    storage: SharedStorage,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Store `token` and `user` as the current session.
    ///
    /// The token is written last, so a failed write never leaves a token
    /// without its user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the user cannot be encoded or written.
    pub fn set_auth(&self, token: &str, user: &User) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(user)?;
        self.storage.remove(keys::AUTH_TOKEN)?;
        self.storage.set(keys::AUTH_USER, &raw)?;
        self.storage.set(keys::AUTH_TOKEN, token)?;
        tracing::debug!(user_id = %user.id, "Session stored");
        Ok(())
    }

    /// The stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    pub fn token(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self.storage.get(keys::AUTH_TOKEN)?)
    }

    /// The stored user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored user is not valid JSON.
    pub fn user(&self) -> Result<Option<User>, RepositoryError> {
        self.storage
            .get(keys::AUTH_USER)?
            .map(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|e| RepositoryError::DataCorruption(format!("session user: {e}")))
            })
            .transpose()
    }

    /// Merge `patch` into the stored user. Does nothing without a session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the user cannot be read or written.
    pub fn update_user(&self, patch: UserPatch) -> Result<Option<User>, RepositoryError> {
        let Some(mut user) = self.user()? else {
            return Ok(None);
        };
        patch.apply(&mut user);
        self.storage
            .set(keys::AUTH_USER, &serde_json::to_string(&user)?)?;
        Ok(Some(user))
    }

    /// Remove the token and the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    pub fn clear_auth(&self) -> Result<(), RepositoryError> {
        self.storage.remove(keys::AUTH_TOKEN)?;
        self.storage.remove(keys::AUTH_USER)?;
        Ok(())
    }

    /// Whether a token is stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    pub fn is_authenticated(&self) -> Result<bool, RepositoryError> {
        Ok(self.token()?.is_some())
    }
}
