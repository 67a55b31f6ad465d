use crate::error::AppError;
use crate::models::{Project, ProjectInput, ProjectUpdate};
use sqlx::PgPool;

const PROJECT_COLUMNS: &str = "id, title, description, owner_id, created_at, updated_at";

pub async fn insert(
    pool: &PgPool,
    owner_id: i32,
    input: &ProjectInput,
) -> Result<Project, AppError> {
    let project = sqlx::query_as::<_, Project>(&format!(
        "INSERT INTO projects (title, description, owner_id) VALUES ($1, $2, $3) RETURNING {}",
        PROJECT_COLUMNS
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(project)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Project>, AppError> {
    let project = sqlx::query_as::<_, Project>(&format!(
        "SELECT {} FROM projects WHERE id = $1",
        PROJECT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// Lists the projects visible to a user: those they own plus those they
/// collaborate on, deduplicated.
pub async fn list_for_user(pool: &PgPool, user_id: i32) -> Result<Vec<Project>, AppError> {
    let projects = sqlx::query_as::<_, Project>(
        "SELECT DISTINCT p.id, p.title, p.description, p.owner_id, p.created_at, p.updated_at \
         FROM projects p \
         LEFT JOIN project_collaborators c ON c.project_id = p.id \
         WHERE p.owner_id = $1 OR c.user_id = $1 \
         ORDER BY p.created_at DESC, p.id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

/// Applies a partial update. `updated_at` is always refreshed. Returns `None`
/// when no project has the given id.
pub async fn update(
    pool: &PgPool,
    id: i32,
    patch: &ProjectUpdate,
) -> Result<Option<Project>, AppError> {
    let mut sets: Vec<String> = Vec::new();
    let mut param_count = 1;

    if patch.title.is_some() {
        sets.push(format!("title = ${}", param_count));
        param_count += 1;
    }
    if patch.description.is_some() {
        sets.push(format!("description = ${}", param_count));
        param_count += 1;
    }
    sets.push("updated_at = now()".to_string());

    let sql = format!(
        "UPDATE projects SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        param_count,
        PROJECT_COLUMNS
    );

    let mut query = sqlx::query_as::<_, Project>(&sql);
    if let Some(title) = &patch.title {
        query = query.bind(title);
    }
    if let Some(description) = &patch.description {
        query = query.bind(description);
    }
    query = query.bind(id);

    Ok(query.fetch_optional(pool).await?)
}

/// Deletes a project. The store cascades to its tasks and collaborator rows.
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
