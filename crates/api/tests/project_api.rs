//! HTTP-level integration tests for projects and their nested tasks.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_client, create_project, delete_auth, get_auth, post_json_auth,
    put_json_auth, signup_token,
};
use sqlx::PgPool;

/// Out-of-range progress values are clamped into [0, 100], not rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn project_progress_is_clamped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Clamp Agency", "owner@clamp.test").await;
    let client = create_client(&app, &token, "Clampy").await;
    let client_id = client["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "client_id": client_id,
        "name": "Overshoot",
        "progress": 150,
    });
    let response = post_json_auth(&app, "/api/v1/projects", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["progress"], 100);

    let id = json["id"].as_i64().unwrap();
    let body = serde_json::json!({ "progress": -20 });
    let response = put_json_auth(&app, &format!("/api/v1/projects/{id}"), &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["progress"], 0);
}

/// start_date after due_date is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn project_rejects_inverted_date_range(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Date Agency", "owner@dates.test").await;
    let client = create_client(&app, &token, "Datey").await;

    let body = serde_json::json!({
        "client_id": client["id"],
        "name": "Backwards",
        "start_date": "2026-09-10",
        "due_date": "2026-09-01",
    });
    let response = post_json_auth(&app, "/api/v1/projects", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A project cannot be created against another agency's client.
#[sqlx::test(migrations = "../../db/migrations")]
async fn project_requires_own_client(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token_a = signup_token(&app, "Agency A", "a@proj.test").await;
    let token_b = signup_token(&app, "Agency B", "b@proj.test").await;
    let client = create_client(&app, &token_a, "NotYours").await;

    let body = serde_json::json!({
        "client_id": client["id"],
        "name": "Stolen",
    });
    let response = post_json_auth(&app, "/api/v1/projects", &token_b, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The project list joins client names, newest update first.
#[sqlx::test(migrations = "../../db/migrations")]
async fn project_list_joins_client_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Join Agency", "owner@join.test").await;
    let client = create_client(&app, &token, "Joined Client").await;
    create_project(&app, &token, client["id"].as_i64().unwrap(), "Visible").await;

    let response = get_auth(&app, "/api/v1/projects", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Visible");
    assert_eq!(rows[0]["client_name"], "Joined Client");
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// New tasks start as todo; repeated advances cycle
/// todo -> in_progress -> done -> todo.
#[sqlx::test(migrations = "../../db/migrations")]
async fn task_advance_cycles_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "Task Agency", "owner@tasks.test").await;
    let client = create_client(&app, &token, "Tasky").await;
    let project = create_project(&app, &token, client["id"].as_i64().unwrap(), "Board").await;
    let pid = project["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "Write copy" });
    let response = post_json_auth(&app, &format!("/api/v1/projects/{pid}/tasks"), &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await;
    assert_eq!(task["status"], "todo");
    let tid = task["id"].as_i64().unwrap();

    let advance_uri = format!("/api/v1/projects/{pid}/tasks/{tid}/advance");
    for expected in ["in_progress", "done", "todo"] {
        let response = post_json_auth(&app, &advance_uri, &token, serde_json::json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], expected);
    }
}

/// Task routes 404 when the parent project belongs to another agency.
#[sqlx::test(migrations = "../../db/migrations")]
async fn tasks_are_scoped_through_the_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token_a = signup_token(&app, "Agency A", "a@taskscope.test").await;
    let token_b = signup_token(&app, "Agency B", "b@taskscope.test").await;
    let client = create_client(&app, &token_a, "Scoped").await;
    let project = create_project(&app, &token_a, client["id"].as_i64().unwrap(), "Hidden").await;
    let pid = project["id"].as_i64().unwrap();

    let response = get_auth(&app, &format!("/api/v1/projects/{pid}/tasks"), &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting a task returns 204, then 404 on repeat.
#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_task_then_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(&app, "TaskDel Agency", "owner@taskdel.test").await;
    let client = create_client(&app, &token, "Deleter").await;
    let project = create_project(&app, &token, client["id"].as_i64().unwrap(), "Cleanup").await;
    let pid = project["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "Ephemeral" });
    let response = post_json_auth(&app, &format!("/api/v1/projects/{pid}/tasks"), &token, body).await;
    let task = body_json(response).await;
    let tid = task["id"].as_i64().unwrap();

    let uri = format!("/api/v1/projects/{pid}/tasks/{tid}");
    let response = delete_auth(&app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(&app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
