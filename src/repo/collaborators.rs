use crate::error::AppError;
use crate::models::{CollaboratorInput, CollaboratorRole, ProjectCollaborator};
use sqlx::PgPool;

const COLLABORATOR_COLUMNS: &str = "id, user_id, project_id, role, created_at";

/// Persists a collaboration record. The store's unique (user, project)
/// constraint and foreign keys reject duplicates and dangling references
/// atomically.
pub async fn insert(
    pool: &PgPool,
    input: &CollaboratorInput,
) -> Result<ProjectCollaborator, AppError> {
    let collaborator = sqlx::query_as::<_, ProjectCollaborator>(&format!(
        "INSERT INTO project_collaborators (user_id, project_id, role) \
         VALUES ($1, $2, $3) RETURNING {}",
        COLLABORATOR_COLUMNS
    ))
    .bind(input.user_id)
    .bind(input.project_id)
    .bind(input.role)
    .fetch_one(pool)
    .await?;

    Ok(collaborator)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<ProjectCollaborator>, AppError> {
    let collaborator = sqlx::query_as::<_, ProjectCollaborator>(&format!(
        "SELECT {} FROM project_collaborators WHERE id = $1",
        COLLABORATOR_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(collaborator)
}

pub async fn find_pair(
    pool: &PgPool,
    user_id: i32,
    project_id: i32,
) -> Result<Option<ProjectCollaborator>, AppError> {
    let collaborator = sqlx::query_as::<_, ProjectCollaborator>(&format!(
        "SELECT {} FROM project_collaborators WHERE user_id = $1 AND project_id = $2",
        COLLABORATOR_COLUMNS
    ))
    .bind(user_id)
    .bind(project_id)
    .fetch_optional(pool)
    .await?;

    Ok(collaborator)
}

/// All collaborator rows of one project, for access checks and listings.
pub async fn list_for_project(
    pool: &PgPool,
    project_id: i32,
) -> Result<Vec<ProjectCollaborator>, AppError> {
    let collaborators = sqlx::query_as::<_, ProjectCollaborator>(&format!(
        "SELECT {} FROM project_collaborators WHERE project_id = $1 ORDER BY created_at, id",
        COLLABORATOR_COLUMNS
    ))
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(collaborators)
}

/// Collaborator rows of every project the user can see (owned or
/// collaborated on).
pub async fn list_for_user(
    pool: &PgPool,
    user_id: i32,
) -> Result<Vec<ProjectCollaborator>, AppError> {
    let collaborators = sqlx::query_as::<_, ProjectCollaborator>(&format!(
        "SELECT {} FROM project_collaborators WHERE project_id IN ( \
             SELECT id FROM projects WHERE owner_id = $1 \
             UNION \
             SELECT project_id FROM project_collaborators WHERE user_id = $1 \
         ) ORDER BY created_at, id",
        COLLABORATOR_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(collaborators)
}

/// Changes the role of a collaboration. Returns `None` when no record has
/// the given id.
pub async fn update_role(
    pool: &PgPool,
    id: i32,
    role: CollaboratorRole,
) -> Result<Option<ProjectCollaborator>, AppError> {
    let collaborator = sqlx::query_as::<_, ProjectCollaborator>(&format!(
        "UPDATE project_collaborators SET role = $1 WHERE id = $2 RETURNING {}",
        COLLABORATOR_COLUMNS
    ))
    .bind(role)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(collaborator)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM project_collaborators WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
