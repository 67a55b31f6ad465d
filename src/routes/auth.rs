use crate::{
    auth::{
        hash_password, verify_password, AuthResponse, AuthenticatedUserId, LoginRequest,
        SignupRequest, TokenSettings,
    },
    error::AppError,
    models::UserResponse,
    repo,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Sign up a new user
///
/// Creates a new user account and returns an authentication token alongside
/// the created user.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenSettings>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;

    // Check for existing username and email; the store's unique constraints
    // still catch a concurrent duplicate at insert time.
    if repo::users::find_by_username(pool.get_ref(), &signup_data.username)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Username already exists".into()));
    }
    if repo::users::find_by_email(pool.get_ref(), &signup_data.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Email already exists".into()));
    }

    // Hash password
    let password_hash = hash_password(&signup_data.password)?;

    let user = repo::users::insert(
        pool.get_ref(),
        &signup_data.username,
        &signup_data.email,
        &password_hash,
    )
    .await?;

    // Generate token
    let token = tokens.issue(user.id)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Login user
///
/// Authenticates by username or email and returns an authentication token.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenSettings>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user =
        repo::users::find_by_username_or_email(pool.get_ref(), &login_data.username_or_email)
            .await?;

    match user {
        Some(user) if verify_password(&login_data.password, &user.password_hash) => {
            let token = tokens.issue(user.id)?;
            Ok(HttpResponse::Ok().json(AuthResponse {
                token,
                user: user.into(),
            }))
        }
        // Same response whether the user is unknown or the password is wrong.
        _ => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}

/// Returns the user behind the presented token.
#[get("/me")]
pub async fn me(
    pool: web::Data<PgPool>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let user = repo::users::find(pool.get_ref(), identity.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({ "user": UserResponse::from(user) })))
}
