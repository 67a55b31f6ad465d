mod common;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::header, test, web, App};
use planboard::auth::{AuthMiddleware, AuthResponse, TokenSettings};
use planboard::routes;
use serde_json::json;

#[actix_rt::test]
async fn test_signup_and_login_flow() {
    let pool = match common::try_pool().await {
        Some(pool) => pool,
        None => {
            eprintln!("DATABASE_URL not available; skipping integration test");
            return;
        }
    };
    common::cleanup_user(&pool, "integration_user", "integration@example.com").await;
    common::cleanup_user(&pool, "other_user", "other@example.com").await;

    let tokens = TokenSettings::new(common::TEST_JWT_SECRET);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::index)
            .service(routes::health::health)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::new(tokens.clone()))
                    .configure(routes::config),
            ),
    )
    .await;

    // Sign up a new user
    let signup_payload = json!({
        "username": "integration_user",
        "email": "integration@example.com",
        "password": "Password123!"
    });
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(&signup_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Signup failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );
    let signup_response: AuthResponse =
        serde_json::from_slice(&body_bytes).expect("Failed to parse signup response JSON");
    assert!(!signup_response.token.is_empty());
    assert_eq!(signup_response.user.username, "integration_user");

    // Signing up the same username again must fail without creating a record
    let req_conflict = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(&signup_payload)
        .to_request();
    let resp_conflict = test::call_service(&app, req_conflict).await;
    assert_eq!(
        resp_conflict.status(),
        actix_web::http::StatusCode::BAD_REQUEST,
        "Duplicate signup did not fail as expected"
    );

    // A different username with the same email must fail as well
    let req_dup_email = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(&json!({
            "username": "other_user",
            "email": "integration@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp_dup_email = test::call_service(&app, req_dup_email).await;
    assert_eq!(
        resp_dup_email.status(),
        actix_web::http::StatusCode::BAD_REQUEST,
        "Duplicate email signup did not fail as expected"
    );

    // Login with the username
    let req_login = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&json!({
            "username_or_email": "integration_user",
            "password": "Password123!"
        }))
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    let status_login = resp_login.status();
    let body_login = test::read_body(resp_login).await;
    assert_eq!(
        status_login,
        actix_web::http::StatusCode::OK,
        "Login by username failed. Body: {:?}",
        String::from_utf8_lossy(&body_login)
    );
    let login_response: AuthResponse =
        serde_json::from_slice(&body_login).expect("Failed to parse login response JSON");
    assert!(!login_response.token.is_empty());
    assert_eq!(login_response.user.id, signup_response.user.id);

    // Login with the email works through the same field
    let req_login_email = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&json!({
            "username_or_email": "integration@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp_login_email = test::call_service(&app, req_login_email).await;
    assert_eq!(resp_login_email.status(), actix_web::http::StatusCode::OK);

    // A wrong password is rejected
    let req_bad_password = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&json!({
            "username_or_email": "integration_user",
            "password": "WrongPassword!"
        }))
        .to_request();
    let resp_bad_password = test::call_service(&app, req_bad_password).await;
    assert_eq!(
        resp_bad_password.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );

    // The token identifies its user on /auth/me
    let req_me = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((header::AUTHORIZATION, common::bearer(&login_response.token)))
        .to_request();
    let resp_me = test::call_service(&app, req_me).await;
    assert_eq!(resp_me.status(), actix_web::http::StatusCode::OK);
    let me_body: serde_json::Value = test::read_body_json(resp_me).await;
    assert_eq!(me_body["user"]["username"], "integration_user");
    assert!(
        me_body["user"].get("password_hash").is_none(),
        "Password hash must never be serialized"
    );

    // Without a token /auth/me is unauthorized
    let req_me_anon = test::TestRequest::get().uri("/auth/me").to_request();
    let resp_me_anon = test::call_service(&app, req_me_anon).await;
    assert_eq!(
        resp_me_anon.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );

    common::cleanup_user(&pool, "integration_user", "integration@example.com").await;
}

#[actix_rt::test]
async fn test_signup_rejects_invalid_payloads() {
    let pool = match common::try_pool().await {
        Some(pool) => pool,
        None => {
            eprintln!("DATABASE_URL not available; skipping integration test");
            return;
        }
    };

    let tokens = TokenSettings::new(common::TEST_JWT_SECRET);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::new(tokens.clone()))
                    .configure(routes::config),
            ),
    )
    .await;

    // Invalid email
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(&json!({
            "username": "validname",
            "email": "invalid-email",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());

    // Short password
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(&json!({
            "username": "validname",
            "email": "valid@example.com",
            "password": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());

    // Missing fields
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(&json!({ "username": "validname" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}
