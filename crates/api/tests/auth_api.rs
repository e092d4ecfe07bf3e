//! HTTP-level integration tests for signup, login, refresh, and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, signup};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Signup creates an agency plus an admin user and signs them in.
#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_creates_agency_and_admin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = signup(&app, "Bright Ideas Studio", "owner@bright.test").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["email"], "owner@bright.test");
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["user"]["agency_id"].is_number());
}

/// Signing up twice with the same email returns 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    signup(&app, "First Agency", "dup@test.com").await;

    let body = serde_json::json!({
        "agency_name": "Second Agency",
        "full_name": "Other Person",
        "email": "dup@test.com",
        "password": "another_password_1",
    });
    let response = post_json(&app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Malformed email and short password are both rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_validates_email_and_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let bad_email = serde_json::json!({
        "agency_name": "A",
        "full_name": "B",
        "email": "not-an-email",
        "password": "long_enough_pw",
    });
    let response = post_json(&app, "/api/v1/auth/signup", bad_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let short_pw = serde_json::json!({
        "agency_name": "A",
        "full_name": "B",
        "email": "ok@test.com",
        "password": "short",
    });
    let response = post_json(&app, "/api/v1/auth/signup", short_pw).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// A signed-up user can log in with email + password.
#[sqlx::test(migrations = "../../db/migrations")]
async fn login_succeeds_with_correct_credentials(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(&app, "Login Agency", "login@test.com").await;

    let body = serde_json::json!({ "email": "login@test.com", "password": "test_password_123!" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["email"], "login@test.com");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(&app, "Login Agency", "wrongpw@test.com").await;

    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent email returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn login_nonexistent_user_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Five consecutive failed logins lock the account (403 even with the
/// correct password afterwards).
#[sqlx::test(migrations = "../../db/migrations")]
async fn account_locks_after_five_failed_attempts(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(&app, "Lockout Agency", "lockme@test.com").await;

    for _ in 0..5 {
        let body = serde_json::json!({ "email": "lockme@test.com", "password": "bad" });
        let response = post_json(&app, "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let body = serde_json::json!({ "email": "lockme@test.com", "password": "test_password_123!" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

/// Refresh rotates tokens: the new pair works, the old refresh token does not.
#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_refresh_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = signup(&app, "Refresh Agency", "refresh@test.com").await;
    let old_refresh = json["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(&app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let new_json = body_json(response).await;
    assert!(new_json["access_token"].is_string());
    assert_ne!(new_json["refresh_token"].as_str().unwrap(), old_refresh);

    // The old token was revoked by the rotation.
    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(&app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes all sessions; the refresh token stops working.
#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_sessions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = signup(&app, "Logout Agency", "logout@test.com").await;
    let access = json["access_token"].as_str().unwrap();
    let refresh = json["refresh_token"].as_str().unwrap();

    let response = post_json_auth(
        &app,
        "/api/v1/auth/logout",
        access,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh });
    let response = post_json(&app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A protected route rejects missing and malformed tokens with 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_require_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(&app, "/api/v1/clients").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(&app, "/api/v1/clients", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
