//! User persistence. Uniqueness of username and email is enforced by the
//! store's constraints, so concurrent duplicate writes resolve atomically.

use crate::error::AppError;
use crate::models::{User, UserChanges};
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

pub async fn insert(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
        USER_COLUMNS
    ))
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = $1",
        USER_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = $1",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Looks a user up by either their username or their email, for login.
pub async fn find_by_username_or_email(
    pool: &PgPool,
    identifier: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = $1 OR email = $1",
        USER_COLUMNS
    ))
    .bind(identifier)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY id",
        USER_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Applies a resolved set of column changes. `updated_at` is always
/// refreshed, even when no other column changes. Returns `None` when no user
/// has the given id.
pub async fn update(
    pool: &PgPool,
    id: i32,
    changes: &UserChanges,
) -> Result<Option<User>, AppError> {
    let mut sets: Vec<String> = Vec::new();
    let mut param_count = 1;

    if changes.username.is_some() {
        sets.push(format!("username = ${}", param_count));
        param_count += 1;
    }
    if changes.email.is_some() {
        sets.push(format!("email = ${}", param_count));
        param_count += 1;
    }
    if changes.password_hash.is_some() {
        sets.push(format!("password_hash = ${}", param_count));
        param_count += 1;
    }
    sets.push("updated_at = now()".to_string());

    let sql = format!(
        "UPDATE users SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        param_count,
        USER_COLUMNS
    );

    let mut query = sqlx::query_as::<_, User>(&sql);
    if let Some(username) = &changes.username {
        query = query.bind(username);
    }
    if let Some(email) = &changes.email {
        query = query.bind(email);
    }
    if let Some(password_hash) = &changes.password_hash {
        query = query.bind(password_hash);
    }
    query = query.bind(id);

    Ok(query.fetch_optional(pool).await?)
}

/// Deletes a user. The store cascades to their owned projects (and those
/// projects' tasks and collaborator rows), their assigned tasks, and their
/// own collaboration records.
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
