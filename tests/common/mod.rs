#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use skillswap::router::init_router;
use skillswap::state::AppState;
use skillswap_auth::create_access_token;
use skillswap_config::{CorsConfig, EmailConfig, JwtConfig};
use skillswap_core::hash_password;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        token_expiry: 7_776_000,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        email_config: EmailConfig::disabled(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts a user with a phone number and an instagram handle.
pub async fn create_test_user(
    pool: &PgPool,
    name: &str,
    skills_offered: &[&str],
    skills_wanted: &[&str],
) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();
    let skills_offered: Vec<String> = skills_offered.iter().map(|s| s.to_string()).collect();
    let skills_wanted: Vec<String> = skills_wanted.iter().map(|s| s.to_string()).collect();

    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (name, email, password, bio, skills_offered, skills_wanted, instagram, phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(&email)
    .bind(&hashed)
    .bind(format!("{} likes trading skills", name))
    .bind(&skills_offered)
    .bind(&skills_wanted)
    .bind(format!("{}.insta", name.to_lowercase()))
    .bind("555-0100")
    .fetch_one(pool)
    .await
    .unwrap();

    let token = create_access_token(id, &test_jwt_config()).unwrap();

    TestUser {
        id,
        name: name.to_string(),
        email,
        password: TEST_PASSWORD.to_string(),
        token,
    }
}

/// Sends a request through the router and decodes the JSON response body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
