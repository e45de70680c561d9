//! HTTP surface: login flow, the auth middleware and the admin gate,
//! driven through the router as a tower service.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use timesheet_server::auth::JwtConfig;
use timesheet_server::core::{Config, ServerState, seed, server};

fn test_config() -> Config {
    Config {
        work_dir: "/tmp/timesheet-test".to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "test-secret-key-that-is-long-enough-0123".to_string(),
            expiration_minutes: 60,
            issuer: "timesheet-server".to_string(),
            audience: "timesheet-clients".to_string(),
        },
        environment: "development".to_string(),
        admin_name: "admin".to_string(),
        admin_password: "admin-password".to_string(),
    }
}

async fn test_app() -> Router {
    let state = ServerState::memory(test_config()).await.expect("state");
    seed::ensure_admin(&state).await.expect("seed");
    server::build_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

async fn login(app: &Router, name: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({"name": name, "password": password}),
        ))
        .await
        .expect("login response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn health_is_public_but_api_routes_need_a_token() {
    let app = test_app().await;

    let health = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("health response");
    assert_eq!(health.status(), StatusCode::OK);

    let entries = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/entries")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("entries response");
    assert_eq!(entries.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials_with_a_uniform_error() {
    let app = test_app().await;

    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({"name": "admin", "password": "nope"}),
        ))
        .await
        .expect("response");
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    let first = body_json(wrong_password).await;

    let unknown_user = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({"name": "nobody", "password": "nope"}),
        ))
        .await
        .expect("response");
    assert_eq!(unknown_user.status(), StatusCode::BAD_REQUEST);
    let second = body_json(unknown_user).await;

    // Same message either way, no username enumeration
    assert_eq!(first["message"], second["message"]);
}

#[tokio::test]
async fn registration_then_login_then_entry_creation() {
    let app = test_app().await;
    let admin_token = login(&app, "admin", "admin-password").await;

    // Find the seeded department id
    let departments = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/departments")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("departments response");
    assert_eq!(departments.status(), StatusCode::OK);
    let departments = body_json(departments).await;
    let department_id = departments[0]["id"].as_str().expect("department id");

    let register = app
        .clone()
        .oneshot(post_json(
            "/api/auth/reg",
            None,
            json!({
                "name": "alice-dev",
                "password": "alice-password",
                "position": "DEVELOPER",
                "department_id": department_id,
            }),
        ))
        .await
        .expect("register response");
    assert_eq!(register.status(), StatusCode::OK);
    let registered = body_json(register).await;
    assert_eq!(registered["role"], "USER");
    let alice_id = registered["id"].as_str().expect("employee id").to_string();

    let alice_token = login(&app, "alice-dev", "alice-password").await;

    let create = app
        .clone()
        .oneshot(post_json(
            "/api/entries",
            Some(&alice_token),
            json!({
                "work_date": "2026-03-02",
                "hours_worked": "7.5",
                "employee_id": alice_id,
            }),
        ))
        .await
        .expect("create response");
    assert_eq!(create.status(), StatusCode::OK);
    let entry = body_json(create).await;
    assert_eq!(entry["work_date"], "2026-03-02");
    assert_eq!(entry["employee_id"], alice_id);
}

#[tokio::test]
async fn employee_management_requires_the_admin_role() {
    let app = test_app().await;
    let admin_token = login(&app, "admin", "admin-password").await;

    let departments = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/departments")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("departments response");
    let departments = body_json(departments).await;
    let department_id = departments[0]["id"].as_str().expect("department id");

    // Register a plain user
    let register = app
        .clone()
        .oneshot(post_json(
            "/api/auth/reg",
            None,
            json!({
                "name": "bob-user",
                "password": "bob-password",
                "position": "TESTER",
                "department_id": department_id,
            }),
        ))
        .await
        .expect("register response");
    assert_eq!(register.status(), StatusCode::OK);
    let user_token = login(&app, "bob-user", "bob-password").await;

    let payload = json!({
        "name": "someone-new",
        "password": "a-password",
        "role": "USER",
        "position": "ANALYST",
        "department": department_id,
    });

    let denied = app
        .clone()
        .oneshot(post_json("/api/employees", Some(&user_token), payload.clone()))
        .await
        .expect("denied response");
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let allowed = app
        .clone()
        .oneshot(post_json("/api/employees", Some(&admin_token), payload))
        .await
        .expect("allowed response");
    assert_eq!(allowed.status(), StatusCode::OK);
}
