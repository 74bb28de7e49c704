//! HTTP-level integration tests for the `/api/users` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. Backed by the in-memory store.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, create_ana, create_editor_role, delete, get, post_json, put_json};
use roster_api::password::verify_password;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_users_on_empty_store_returns_empty_array() {
    let (app, _) = common::build_test_app();
    let response = get(&app, "/api/users").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_user_returns_201_with_defaults() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;

    let response = post_json(
        &app,
        "/api/users",
        serde_json::json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "secret1",
            "roleId": role_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["name"], "Ana");
    assert_eq!(json["status"], "active");
    assert_eq!(json["roleId"], role_id);
    assert!(json["createdAt"].is_string());
    assert!(json.get("password").is_none(), "password must never be echoed");
}

#[tokio::test]
async fn test_create_user_stores_hashed_password() {
    let (app, store) = common::build_test_app();
    let role_id = create_editor_role(&app).await;
    let created = create_ana(&app, role_id).await;
    let id = created["id"].as_i64().unwrap();

    let hash = store.password_hash(id).await.unwrap();
    assert_ne!(hash, "secret1");
    assert!(verify_password("secret1", &hash).unwrap());
}

#[tokio::test]
async fn test_create_user_missing_field_returns_400() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;

    let response = post_json(
        &app,
        "/api/users",
        serde_json::json!({"name": "Ana", "email": "ana@x.com", "roleId": role_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_user_blank_name_returns_400() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;

    let response = post_json(
        &app,
        "/api/users",
        serde_json::json!({
            "name": "  ",
            "email": "ana@x.com",
            "password": "secret1",
            "roleId": role_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_user_with_unknown_role_returns_409() {
    let (app, _) = common::build_test_app();

    let response = post_json(
        &app,
        "/api/users",
        serde_json::json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "secret1",
            "roleId": 42,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn test_email_format_is_not_enforced_by_service() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;

    let response = post_json(
        &app,
        "/api/users",
        serde_json::json!({
            "name": "Ana",
            "email": "not-an-email",
            "password": "1",
            "roleId": role_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Scenario: role + user + list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_listed_user_embeds_role_and_matches_created_record() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;
    let created = create_ana(&app, role_id).await;

    let response = get(&app, "/api/users").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["role"]["name"], "Editor");
    assert_eq!(users[0], created);
}

#[tokio::test]
async fn test_created_users_get_unique_ids() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;
    let first = create_ana(&app, role_id).await;
    let second = create_ana(&app, role_id).await;

    assert_ne!(first["id"], second["id"]);
    let listed = body_json(get(&app, "/api/users").await).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_status_leaves_other_fields_unchanged() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;
    let created = create_ana(&app, role_id).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/users/{id}"),
        serde_json::json!({"status": "deactive"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "deactive");

    let listed = body_json(get(&app, "/api/users").await).await;
    let user = &listed[0];
    assert_eq!(user["status"], "deactive");
    for field in ["id", "name", "email", "roleId", "role", "createdAt"] {
        assert_eq!(user[field], created[field], "{field} should be unchanged");
    }
}

#[tokio::test]
async fn test_update_password_rehashes() {
    let (app, store) = common::build_test_app();
    let role_id = create_editor_role(&app).await;
    let id = create_ana(&app, role_id).await["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/users/{id}"),
        serde_json::json!({"password": "another1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let hash = store.password_hash(id).await.unwrap();
    assert!(verify_password("another1", &hash).unwrap());
    assert!(!verify_password("secret1", &hash).unwrap());
}

#[tokio::test]
async fn test_update_with_invalid_status_returns_400() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;
    let id = create_ana(&app, role_id).await["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/users/{id}"),
        serde_json::json!({"status": "suspended"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_nonexistent_user_returns_404() {
    let (app, _) = common::build_test_app();
    let response = put_json(
        &app,
        "/api/users/999",
        serde_json::json!({"name": "Nobody"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "User with id 999 not found");
}

#[tokio::test]
async fn test_update_nonexistent_user_with_unknown_role_returns_404() {
    let (app, _) = common::build_test_app();
    let response = put_json(
        &app,
        "/api/users/999",
        serde_json::json!({"roleId": 42}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let (app, _) = common::build_test_app();
    let response = put_json(&app, "/api/users/abc", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_user_returns_204_with_empty_body() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;
    let id = create_ana(&app, role_id).await["id"].as_i64().unwrap();

    let response = delete(&app, &format!("/api/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let listed = body_json(get(&app, "/api/users").await).await;
    assert_eq!(listed, serde_json::json!([]));
}

#[tokio::test]
async fn test_second_delete_fails() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;
    let id = create_ana(&app, role_id).await["id"].as_i64().unwrap();

    let first = delete(&app, &format!("/api/users/{id}")).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = delete(&app, &format!("/api/users/{id}")).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_after_delete_fails() {
    let (app, _) = common::build_test_app();
    let role_id = create_editor_role(&app).await;
    let id = create_ana(&app, role_id).await["id"].as_i64().unwrap();

    delete(&app, &format!("/api/users/{id}")).await;

    let response = put_json(
        &app,
        &format!("/api/users/{id}"),
        serde_json::json!({"status": "deactive"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
