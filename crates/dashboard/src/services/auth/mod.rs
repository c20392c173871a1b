//! Mock authentication service.
//!
//! Credentials are checked against a fixed list of demo accounts. A
//! successful login or registration issues a random opaque token and stores
//! it with the user in the [`SessionStore`]. Registered accounts only live in
//! the session; they are never added to the credential list.

mod error;

pub use error::AuthError;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use msme_core::{Email, UserId, UserRole};

use super::session::SessionStore;
use crate::db::Latency;
use crate::models::{AuthResponse, User};

/// A demo account.
struct MockUser {
    id: &'static str,
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: UserRole,
    /// Unix seconds.
    created_at: i64,
}

impl MockUser {
    fn to_user(&self) -> Result<User, AuthError> {
        Ok(User {
            id: UserId::new(self.id),
            email: Email::parse(self.email)?,
            name: self.name.to_string(),
            role: self.role,
            business_type: None,
            created_at: DateTime::from_timestamp(self.created_at, 0).unwrap_or_default(),
        })
    }
}

const MOCK_USERS: [MockUser; 2] = [
    MockUser {
        id: "1",
        email: "test@msme.com",
        password: "pass123",
        name: "John Doe",
        role: UserRole::Admin,
        created_at: 1_704_067_200,
    },
    MockUser {
        id: "2",
        email: "demo@msme.com",
        password: "demo123",
        name: "Jane Smith",
        role: UserRole::User,
        created_at: 1_705_276_800,
    },
];

/// Length of a session token before encoding.
const TOKEN_BYTES: usize = 32;

/// Generate a random URL-safe session token.
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Login, registration and logout over the session store.
pub struct AuthService<'a> {
    sessions: &'a SessionStore,
    latency: &'a Latency,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(sessions: &'a SessionStore, latency: &'a Latency) -> Self {
        Self { sessions, latency }
    }

    /// Check credentials and start a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no demo account matches.
    /// Returns `AuthError::Session` if the session cannot be stored.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, AuthError> {
        self.latency.simulate_write().await;

        let account = MOCK_USERS
            .iter()
            .find(|u| {
                u.email.eq_ignore_ascii_case(email.trim()) && u.password == password.expose_secret()
            })
            .ok_or_else(|| {
                tracing::warn!("Login failed");
                AuthError::InvalidCredentials
            })?;

        let user = account.to_user()?;
        let response = self.start_session(user)?;
        tracing::info!(user_id = %response.user.id, "User logged in");
        Ok(response)
    }

    /// Create a `user`-role account and start a session for it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed.
    /// Returns `AuthError::UserExists` if the email belongs to a demo account.
    /// Returns `AuthError::Invalid` if the name or password is empty.
    #[instrument(skip(self, password, name))]
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        name: &str,
    ) -> Result<AuthResponse, AuthError> {
        self.latency.simulate_write().await;

        let email = Email::parse(email)?;
        if MOCK_USERS.iter().any(|u| email.matches(u.email)) {
            return Err(AuthError::UserExists);
        }
        if name.trim().is_empty() {
            return Err(AuthError::Invalid("name cannot be empty".to_string()));
        }
        if password.expose_secret().is_empty() {
            return Err(AuthError::Invalid("password cannot be empty".to_string()));
        }

        let user = User {
            id: UserId::generate(),
            email,
            name: name.trim().to_string(),
            role: UserRole::User,
            business_type: None,
            created_at: Utc::now(),
        };
        let response = self.start_session(user)?;
        tracing::info!(user_id = %response.user.id, "User registered");
        Ok(response)
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the session cannot be cleared.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear_auth()?;
        tracing::info!("User logged out");
        Ok(())
    }

    /// The user behind `token`, if it matches the stored session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if there is no session or the
    /// token does not match.
    pub fn verify(&self, token: &str) -> Result<User, AuthError> {
        match (self.sessions.token()?, self.sessions.user()?) {
            (Some(stored), Some(user)) if stored == token => Ok(user),
            _ => Err(AuthError::NotAuthenticated),
        }
    }

    fn start_session(&self, user: User) -> Result<AuthResponse, AuthError> {
        let token = generate_token();
        self.sessions.set_auth(&token, &user)?;
        Ok(AuthResponse { user, token })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStorage;

    fn sessions() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let sessions = sessions();
        let latency = Latency::none();
        let auth = AuthService::new(&sessions, &latency);

        let response = auth.login("test@msme.com", &secret("pass123")).await.unwrap();

        assert_eq!(response.user.role, UserRole::Admin);
        assert_eq!(sessions.token().unwrap(), Some(response.token.clone()));
        assert_eq!(auth.verify(&response.token).unwrap().name, "John Doe");
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let sessions = sessions();
        let latency = Latency::none();
        let auth = AuthService::new(&sessions, &latency);

        let err = auth.login("demo@msme.com", &secret("pass123")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!sessions.is_authenticated().unwrap());
    }

    #[tokio::test]
    async fn test_register_existing_email() {
        let sessions = sessions();
        let latency = Latency::none();
        let auth = AuthService::new(&sessions, &latency);

        let err = auth
            .register("demo@msme.com", &secret("x"), "Jane")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserExists));
    }

    #[tokio::test]
    async fn test_register_creates_user_role() {
        let sessions = sessions();
        let latency = Latency::none();
        let auth = AuthService::new(&sessions, &latency);

        let response = auth
            .register("new@shop.co.ke", &secret("s3cret"), "Wanjiru")
            .await
            .unwrap();
        assert_eq!(response.user.role, UserRole::User);

        // Registered accounts cannot log in later.
        let err = auth.login("new@shop.co.ke", &secret("s3cret")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_verify_rejects_other_token() {
        let sessions = sessions();
        let latency = Latency::none();
        let auth = AuthService::new(&sessions, &latency);
        assert!(matches!(auth.verify("nope"), Err(AuthError::NotAuthenticated)));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
        assert_eq!(generate_token().len(), 43);
    }
}
