//! Integration tests for mock authentication and the stored session.

use secrecy::SecretString;

use msme_core::UserRole;
use msme_dashboard::models::UserPatch;
use msme_dashboard::services::{AuthError, AuthService};
use msme_dashboard::storage::keys;
use msme_integration_tests::{ADMIN_EMAIL, TestContext};

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

#[tokio::test]
async fn test_login_persists_token_and_user() {
    let ctx = TestContext::new();
    let token = ctx.login().await;

    let sessions = ctx.state.sessions();
    assert!(sessions.is_authenticated().expect("session read"));
    assert_eq!(sessions.token().expect("token read"), Some(token.clone()));
    let user = sessions.user().expect("user read").expect("user present");
    assert_eq!(user.email.as_str(), ADMIN_EMAIL);
    assert_eq!(user.role, UserRole::Admin);
    assert_eq!(ctx.raw(keys::AUTH_TOKEN), Some(token));
}

#[tokio::test]
async fn test_clear_auth_removes_session() {
    let ctx = TestContext::new();
    ctx.login().await;

    let sessions = ctx.state.sessions();
    sessions.clear_auth().expect("clear");

    assert!(!sessions.is_authenticated().expect("session read"));
    assert_eq!(sessions.user().expect("user read"), None);
    assert_eq!(ctx.raw(keys::AUTH_TOKEN), None);
    assert_eq!(ctx.raw(keys::AUTH_USER), None);
}

#[tokio::test]
async fn test_update_user_merges_into_session() {
    let ctx = TestContext::new();
    ctx.login().await;

    let updated = ctx
        .state
        .sessions()
        .update_user(UserPatch {
            business_type: Some("retail".to_string()),
            ..UserPatch::default()
        })
        .expect("update")
        .expect("session present");

    assert_eq!(updated.business_type.as_deref(), Some("retail"));
    assert_eq!(updated.name, "John Doe");
    let stored = ctx.state.sessions().user().expect("read").expect("present");
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_update_user_without_session_is_noop() {
    let ctx = TestContext::new();

    let updated = ctx
        .state
        .sessions()
        .update_user(UserPatch {
            name: Some("Nobody".to_string()),
            ..UserPatch::default()
        })
        .expect("update");

    assert_eq!(updated, None);
    assert_eq!(ctx.raw(keys::AUTH_USER), None);
}

#[tokio::test]
async fn test_new_login_replaces_previous_token() {
    let ctx = TestContext::new();
    let auth = AuthService::new(ctx.state.sessions(), ctx.state.latency());

    let first = ctx.login().await;
    let second = auth
        .login("demo@msme.com", &secret("demo123"))
        .await
        .expect("second login");

    assert!(matches!(auth.verify(&first), Err(AuthError::NotAuthenticated)));
    assert_eq!(auth.verify(&second.token).expect("verify").name, "Jane Smith");
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let ctx = TestContext::new();
    let token = ctx.login().await;
    let auth = AuthService::new(ctx.state.sessions(), ctx.state.latency());

    auth.logout().expect("logout");

    assert!(matches!(auth.verify(&token), Err(AuthError::NotAuthenticated)));
}
