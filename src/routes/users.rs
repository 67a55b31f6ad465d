use crate::{
    auth::hash_password,
    error::AppError,
    models::{UserChanges, UserResponse, UserUpdate},
    repo,
};
use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Lists all users. Serves as the directory for assigning tasks and
/// inviting collaborators.
#[get("")]
pub async fn list_users(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let users = repo::users::list(pool.get_ref()).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(users))
}

#[get("/{id}")]
pub async fn get_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let user = repo::users::find(pool.get_ref(), user_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Applies a partial update to a user.
///
/// Only username, email, and password are mutable; a new password is hashed
/// before it reaches the store. Unknown keys in the body are ignored.
#[patch("/{id}")]
pub async fn update_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
    patch_data: web::Json<UserUpdate>,
) -> Result<impl Responder, AppError> {
    patch_data.validate()?;
    let patch = patch_data.into_inner();

    let changes = UserChanges {
        username: patch.username,
        email: patch.email,
        password_hash: match patch.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        },
    };

    let user = repo::users::update(pool.get_ref(), user_id.into_inner(), &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Deletes a user. Their owned projects, assigned tasks, and collaboration
/// records go with them.
#[delete("/{id}")]
pub async fn delete_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let deleted = repo::users::delete(pool.get_ref(), user_id.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
