//! HTTP-level integration tests for project chat (staff and portal sides).

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_client, create_project, get_auth, post_json, post_json_auth, signup_token,
};
use sqlx::PgPool;

/// Posting a staff message returns the hydrated row with the author's
/// full name and no client attribution.
#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_message_returns_hydrated_author(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Chat Agency", "owner@chat.test").await;
    let client = create_client(&app, &token, "Chatter").await;
    let project = create_project(&app, &token, client["id"].as_i64().unwrap(), "Chatty").await;
    let pid = project["id"].as_i64().unwrap();

    let body = serde_json::json!({ "content": "Kickoff call tomorrow" });
    let response =
        post_json_auth(&app, &format!("/api/v1/projects/{pid}/messages"), &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["content"], "Kickoff call tomorrow");
    assert_eq!(json["author_name"], "Test Admin");
    assert!(json["user_id"].is_number(), "staff message carries user_id");
    assert!(json["client_id"].is_null(), "staff message has no client_id");
}

/// A portal client can post into their own project; the row carries the
/// client's name and no user attribution.
#[sqlx::test(migrations = "../../db/migrations")]
async fn portal_message_is_client_authored(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Portal Chat", "owner@pchat.test").await;
    let client = create_client(&app, &token, "Speaker").await;
    let project = create_project(&app, &token, client["id"].as_i64().unwrap(), "Talks").await;
    let pid = project["id"].as_i64().unwrap();
    let portal_token = client["portal_token"].as_str().unwrap();

    let body = serde_json::json!({ "content": "Looks great!" });
    let uri = format!("/api/v1/portal/{portal_token}/projects/{pid}/messages");
    let response = post_json(&app, &uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["author_name"], "Speaker");
    assert!(json["client_id"].is_number(), "client message carries client_id");
    assert!(json["user_id"].is_null(), "client message has no user_id");
}

/// History interleaves both sides ascending by (created_at, id); messages
/// sent within the same second keep insertion order via the id tie-break.
#[sqlx::test(migrations = "../../db/migrations")]
async fn history_is_ordered_and_interleaved(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Order Agency", "owner@order.test").await;
    let client = create_client(&app, &token, "Orderly").await;
    let project = create_project(&app, &token, client["id"].as_i64().unwrap(), "Thread").await;
    let pid = project["id"].as_i64().unwrap();
    let portal_token = client["portal_token"].as_str().unwrap();

    let staff_uri = format!("/api/v1/projects/{pid}/messages");
    let portal_uri = format!("/api/v1/portal/{portal_token}/projects/{pid}/messages");

    // Fired back-to-back; all three land within the same second on a fast
    // machine, which is exactly the case the id tie-break covers.
    post_json_auth(&app, &staff_uri, &token, serde_json::json!({ "content": "one" })).await;
    post_json(&app, &portal_uri, serde_json::json!({ "content": "two" })).await;
    post_json_auth(&app, &staff_uri, &token, serde_json::json!({ "content": "three" })).await;

    let response = get_auth(&app, &staff_uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let contents: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["one", "two", "three"]);

    // Authorship is distinguishable per row.
    let rows = json.as_array().unwrap();
    assert!(rows[0]["user_id"].is_number() && rows[0]["client_id"].is_null());
    assert!(rows[1]["client_id"].is_number() && rows[1]["user_id"].is_null());
}

/// Empty message content is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_message_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Empty Agency", "owner@empty.test").await;
    let client = create_client(&app, &token, "Silent").await;
    let project = create_project(&app, &token, client["id"].as_i64().unwrap(), "Quiet").await;
    let pid = project["id"].as_i64().unwrap();

    let body = serde_json::json!({ "content": "   " });
    let response =
        post_json_auth(&app, &format!("/api/v1/projects/{pid}/messages"), &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A portal token cannot post into a project owned by a different client.
#[sqlx::test(migrations = "../../db/migrations")]
async fn portal_cannot_reach_another_clients_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Split Agency", "owner@split.test").await;
    let client_a = create_client(&app, &token, "Alpha").await;
    let client_b = create_client(&app, &token, "Beta").await;
    let project_a =
        create_project(&app, &token, client_a["id"].as_i64().unwrap(), "AlphaOnly").await;

    let pid = project_a["id"].as_i64().unwrap();
    let beta_token = client_b["portal_token"].as_str().unwrap();

    let uri = format!("/api/v1/portal/{beta_token}/projects/{pid}/messages");
    let response = post_json(&app, &uri, serde_json::json!({ "content": "intrusion" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
