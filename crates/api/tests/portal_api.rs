//! HTTP-level integration tests for the token-gated client portal.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_client, create_project, get, post_json_auth, signup_token};
use sqlx::PgPool;

/// The overview returns the client, their agency branding, and project
/// summaries with task progress counts.
#[sqlx::test(migrations = "../../db/migrations")]
async fn overview_with_valid_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Portal Agency", "owner@portal.test").await;
    let client = create_client(&app, &token, "Visitor").await;
    let client_id = client["id"].as_i64().unwrap();
    create_project(&app, &token, client_id, "Website").await;
    create_project(&app, &token, client_id, "Branding").await;

    let portal_token = client["portal_token"].as_str().unwrap();
    let response = get(&app, &format!("/api/v1/portal/{portal_token}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["client"]["name"], "Visitor");
    assert_eq!(json["agency"]["name"], "Portal Agency");
    let projects = json["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|p| p["task_count"].is_number()));
}

/// A token that is well-shaped but unknown gets a 401, same as garbage.
#[sqlx::test(migrations = "../../db/migrations")]
async fn bad_tokens_are_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    // 32 lowercase hex chars, but not issued to anyone.
    let unknown = "0123456789abcdef0123456789abcdef";
    let response = get(&app, &format!("/api/v1/portal/{unknown}")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Not even token-shaped.
    let response = get(&app, "/api/v1/portal/not-a-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Project detail bundles the project with its tasks and file metadata.
#[sqlx::test(migrations = "../../db/migrations")]
async fn project_detail_includes_tasks_and_files(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Detail Agency", "owner@detail.test").await;
    let client = create_client(&app, &token, "Curious").await;
    let project = create_project(&app, &token, client["id"].as_i64().unwrap(), "Deep Dive").await;
    let pid = project["id"].as_i64().unwrap();

    let task_body = serde_json::json!({ "title": "Wireframes", "description": null });
    let response =
        post_json_auth(&app, &format!("/api/v1/projects/{pid}/tasks"), &token, task_body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let file_body = serde_json::json!({
        "name": "brief.pdf",
        "url": format!("https://files.example.com/projects/{pid}/brief.pdf"),
        "size": 20_480,
        "mime_type": "application/pdf",
    });
    let response =
        post_json_auth(&app, &format!("/api/v1/projects/{pid}/files"), &token, file_body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let portal_token = client["portal_token"].as_str().unwrap();
    let response = get(&app, &format!("/api/v1/portal/{portal_token}/projects/{pid}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["project"]["name"], "Deep Dive");
    assert_eq!(json["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(json["tasks"][0]["title"], "Wireframes");
    assert_eq!(json["files"].as_array().unwrap().len(), 1);
    assert_eq!(json["files"][0]["name"], "brief.pdf");
}

/// A valid token cannot open a project that belongs to another client,
/// even within the same agency.
#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_scoped_to_owning_client(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Fence Agency", "owner@fence.test").await;
    let client_a = create_client(&app, &token, "Owner").await;
    let client_b = create_client(&app, &token, "Neighbor").await;
    let project_a =
        create_project(&app, &token, client_a["id"].as_i64().unwrap(), "Private").await;

    let pid = project_a["id"].as_i64().unwrap();
    let neighbor_token = client_b["portal_token"].as_str().unwrap();

    let response = get(&app, &format!("/api/v1/portal/{neighbor_token}/projects/{pid}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Portal message history requires project ownership too.
#[sqlx::test(migrations = "../../db/migrations")]
async fn message_history_scoped_to_owning_client(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Hist Agency", "owner@hist.test").await;
    let client_a = create_client(&app, &token, "Talker").await;
    let client_b = create_client(&app, &token, "Lurker").await;
    let project_a =
        create_project(&app, &token, client_a["id"].as_i64().unwrap(), "Threaded").await;
    let pid = project_a["id"].as_i64().unwrap();

    let own_token = client_a["portal_token"].as_str().unwrap();
    let response =
        get(&app, &format!("/api/v1/portal/{own_token}/projects/{pid}/messages")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    let other_token = client_b["portal_token"].as_str().unwrap();
    let response =
        get(&app, &format!("/api/v1/portal/{other_token}/projects/{pid}/messages")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
