mod common;

use axum::http::StatusCode;
use common::{create_test_user, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_is_public_and_hides_contacts(pool: PgPool) {
    create_test_user(&pool, "Ada", &["math"], &["poetry"]).await;
    create_test_user(&pool, "Grace", &["cobol"], &["math"]).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/users", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["results"], 2);

    for user in body["data"]["users"].as_array().unwrap() {
        let mut keys: Vec<&str> = user.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["bio", "createdAt", "id", "name", "skillsOffered", "skillsWanted"]
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_newest_first(pool: PgPool) {
    create_test_user(&pool, "First", &[], &[]).await;
    create_test_user(&pool, "Second", &[], &[]).await;
    create_test_user(&pool, "Third", &[], &[]).await;
    let app = setup_test_app(pool);

    let (_, body) = send(&app, "GET", "/users", None, None).await;
    let names: Vec<&str> = body["data"]["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_filters_by_skill(pool: PgPool) {
    create_test_user(&pool, "Ada", &["math", "rust"], &["poetry"]).await;
    create_test_user(&pool, "Grace", &["cobol"], &["rust"]).await;
    let app = setup_test_app(pool);

    let (_, offered) = send(&app, "GET", "/api/users?skillsOffered=rust", None, None).await;
    assert_eq!(offered["results"], 1);
    assert_eq!(offered["data"]["users"][0]["name"], "Ada");

    let (_, wanted) = send(&app, "GET", "/api/users?skillsWanted=rust", None, None).await;
    assert_eq!(wanted["results"], 1);
    assert_eq!(wanted["data"]["users"][0]["name"], "Grace");

    let (_, none) = send(&app, "GET", "/api/users?skillsOffered=juggling", None, None).await;
    assert_eq!(none["results"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_filters_by_email_and_name(pool: PgPool) {
    let ada = create_test_user(&pool, "Ada", &[], &[]).await;
    create_test_user(&pool, "Grace", &[], &[]).await;
    let app = setup_test_app(pool);

    let uri = format!("/api/users?email={}", ada.email.to_uppercase());
    let (_, by_email) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(by_email["results"], 1);
    assert_eq!(by_email["data"]["users"][0]["id"], ada.id.to_string());

    let (_, by_name) = send(&app, "GET", "/api/users?name=Grace", None, None).await;
    assert_eq!(by_name["results"], 1);
    assert_eq!(by_name["data"]["users"][0]["name"], "Grace");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_ignores_unknown_params(pool: PgPool) {
    create_test_user(&pool, "Ada", &[], &[]).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/users?password=x&sort=desc", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_malformed_query_uses_error_envelope(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        "/api/users?skillsOffered=x&skillsOffered=y",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["code"], "ValidationError");
    assert_eq!(body["message"], "skillsOffered may only be given once");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_me_returns_full_profile(pool: PgPool) {
    let user = create_test_user(&pool, "Ada", &["math"], &[]).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/users/me", Some(&user.token), None).await;

    assert_eq!(status, StatusCode::OK);
    let me = &body["data"]["user"];
    assert_eq!(me["id"], user.id.to_string());
    assert_eq!(me["email"], user.email);
    assert_eq!(me["phone"], "555-0100");
    assert_eq!(me["socialLinks"]["instagram"], "ada.insta");
    assert!(me.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_me_requires_bearer_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "Unauthenticated");

    let (status, _) = send(&app, "GET", "/api/users/me", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_me_applies_allow_listed_fields(pool: PgPool) {
    let user = create_test_user(&pool, "Ada", &["math"], &[]).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/users/me",
        Some(&user.token),
        Some(json!({
            "name": "  Ada King ",
            "skillsWanted": ["chess", " "],
            "socialLinks": { "telegram": "@ada" },
            "email": "hijack@example.com",
            "phone": "000"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let me = &body["data"]["user"];
    assert_eq!(me["name"], "Ada King");
    assert_eq!(me["skillsWanted"], json!(["chess"]));
    assert_eq!(me["skillsOffered"], json!(["math"]));
    assert_eq!(me["socialLinks"]["telegram"], "@ada");
    assert_eq!(me["email"], user.email);
    assert_eq!(me["phone"], "555-0100");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_me_empty_body_is_noop(pool: PgPool) {
    let user = create_test_user(&pool, "Ada", &["math"], &[]).await;
    let app = setup_test_app(pool);

    let (_, before) = send(&app, "GET", "/api/users/me", Some(&user.token), None).await;
    let (status, after) = send(
        &app,
        "PATCH",
        "/api/users/me",
        Some(&user.token),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["data"]["user"], after["data"]["user"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_me_validates_supplied_fields(pool: PgPool) {
    let user = create_test_user(&pool, "Ada", &[], &[]).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/users/me",
        Some(&user.token),
        Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ValidationError");

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/users/me",
        Some(&user.token),
        Some(json!({ "bio": "x".repeat(501) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_me_requires_auth(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, _) = send(&app, "PATCH", "/api/users/me", None, Some(json!({ "bio": "x" }))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
