//! Integration tests for the login and request authentication flow.

mod helpers;

use ttms_auth::ClaimSet;
use ttms_core::error::ErrorKind;
use ttms_entity::user::UserRole;

#[tokio::test]
async fn test_seeded_admin_can_log_in() {
    let app = helpers::TestApp::new().await;

    let header = app.login("Admin", "ttmssmtt-2023").await;
    let authenticated = app
        .authenticator
        .authenticate(Some(&header))
        .await
        .unwrap();

    assert_eq!(authenticated.user.username, "Admin");
    assert_eq!(authenticated.user.role, UserRole::Admin);
    assert_eq!(authenticated.claims.role(), Some("ADMIN"));
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("atchah", "1234", UserRole::Agent).await;

    let err = app.auth.login("atchah", "wrong").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_agent_token_resolves_to_agent() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("johns", "4567", UserRole::Agent).await;

    let header = app.login("johns", "4567").await;
    let authenticated = app
        .authenticator
        .authenticate(Some(&header))
        .await
        .unwrap();

    assert_eq!(authenticated.user.username, "johns");
    assert_eq!(authenticated.claims.role(), Some("AGENT"));
    assert!(
        app.tokens
            .is_valid(header.strip_prefix("Bearer "), &authenticated.user)
            .unwrap()
    );
}

#[tokio::test]
async fn test_token_for_other_user_is_not_valid_for_them() {
    let app = helpers::TestApp::new().await;
    let agent = app.create_test_user("atchah", "1234", UserRole::Agent).await;
    let other = app.create_test_user("johns", "4567", UserRole::Agent).await;

    let token = app.tokens.issue(Some(&agent)).unwrap();
    assert!(app.tokens.is_valid(Some(&token), &agent).unwrap());
    assert!(!app.tokens.is_valid(Some(&token), &other).unwrap());
}

#[tokio::test]
async fn test_expired_token_is_rejected_by_authenticator() {
    let app = helpers::TestApp::new().await;
    let agent = app.create_test_user("atchah", "1234", UserRole::Agent).await;

    let token = app
        .tokens
        .issue_with_claims(Some(&ClaimSet::new()), Some(&agent), Some(-1000))
        .unwrap();

    let err = app
        .authenticator
        .authenticate(Some(&format!("Bearer {token}")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "Token has expired");
}

#[tokio::test]
async fn test_default_lifetime_is_one_day() {
    let app = helpers::TestApp::new().await;
    assert_eq!(app.config.auth.token_ttl_minutes, 24 * 60);
    assert_eq!(app.tokens.default_ttl().num_hours(), 24);
}
