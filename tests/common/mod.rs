//! Shared helpers for the integration test suite.
//!
//! These tests exercise the full HTTP surface against a real Postgres
//! database. They connect using `DATABASE_URL` and apply the schema
//! migrations; when no database is reachable the caller skips the test.

use actix_web::Error as ActixError;
use planboard::auth::AuthResponse;
use serde_json::json;
use sqlx::PgPool;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Connects to the test database and applies migrations. Returns `None`
/// (so the test can skip) when `DATABASE_URL` is unset or unreachable.
pub async fn try_pool() -> Option<PgPool> {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Could not connect to test database: {}", e);
            return None;
        }
    };
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        eprintln!("Could not run migrations on test database: {}", e);
        return None;
    }
    Some(pool)
}

/// Removes any leftover user from a previous run. Cascades clear the
/// user's projects, tasks, and collaborations with them.
pub async fn cleanup_user(pool: &PgPool, username: &str, email: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE username = $1 OR email = $2")
        .bind(username)
        .bind(email)
        .execute(pool)
        .await;
}

/// Signs up a user through the API and returns the token plus user payload.
pub async fn signup_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = ActixError,
    >,
    username: &str,
    email: &str,
    password: &str,
) -> AuthResponse {
    let req = actix_web::test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp = actix_web::test::call_service(app, req).await;
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Signup failed for {}. Body: {:?}",
        username,
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("Failed to parse signup response")
}

/// Formats a bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
