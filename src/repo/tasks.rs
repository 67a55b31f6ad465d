use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskQuery, TaskUpdate};
use sqlx::PgPool;

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, user_id, \
                            project_id, created_at, updated_at";

pub async fn insert(pool: &PgPool, user_id: i32, input: &TaskInput) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, description, status, priority, due_date, user_id, project_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.status)
    .bind(input.priority)
    .bind(input.due_date)
    .bind(user_id)
    .bind(input.project_id)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1",
        TASK_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Lists the tasks assigned to a user, newest first.
///
/// Conditions for status, priority, and project are appended dynamically
/// when the corresponding filter is present.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: i32,
    filter: &TaskQuery,
) -> Result<Vec<Task>, AppError> {
    let mut sql = format!("SELECT {} FROM tasks WHERE user_id = $1", TASK_COLUMNS);
    let mut param_count = 2;

    if filter.status.is_some() {
        sql.push_str(&format!(" AND status = ${}", param_count));
        param_count += 1;
    }
    if filter.priority.is_some() {
        sql.push_str(&format!(" AND priority = ${}", param_count));
        param_count += 1;
    }
    if filter.project_id.is_some() {
        sql.push_str(&format!(" AND project_id = ${}", param_count));
    }

    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let mut query = sqlx::query_as::<_, Task>(&sql);
    query = query.bind(user_id);
    if let Some(status) = filter.status {
        query = query.bind(status);
    }
    if let Some(priority) = filter.priority {
        query = query.bind(priority);
    }
    if let Some(project_id) = filter.project_id {
        query = query.bind(project_id);
    }

    let tasks = query.fetch_all(pool).await?;

    Ok(tasks)
}

/// Applies a partial update. `updated_at` is always refreshed. Returns `None`
/// when no task has the given id.
pub async fn update(pool: &PgPool, id: i32, patch: &TaskUpdate) -> Result<Option<Task>, AppError> {
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
    if patch.status.is_some() {
        sets.push(format!("status = ${}", param_count));
        param_count += 1;
    }
    if patch.priority.is_some() {
        sets.push(format!("priority = ${}", param_count));
        param_count += 1;
    }
    if patch.due_date.is_some() {
        sets.push(format!("due_date = ${}", param_count));
        param_count += 1;
    }
    if patch.project_id.is_some() {
        sets.push(format!("project_id = ${}", param_count));
        param_count += 1;
    }
    sets.push("updated_at = now()".to_string());

    let sql = format!(
        "UPDATE tasks SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        param_count,
        TASK_COLUMNS
    );

    let mut query = sqlx::query_as::<_, Task>(&sql);
    if let Some(title) = &patch.title {
        query = query.bind(title);
    }
    if let Some(description) = &patch.description {
        query = query.bind(description);
    }
    if let Some(status) = patch.status {
        query = query.bind(status);
    }
    if let Some(priority) = patch.priority {
        query = query.bind(priority);
    }
    if let Some(due_date) = patch.due_date {
        query = query.bind(due_date);
    }
    if let Some(project_id) = patch.project_id {
        query = query.bind(project_id);
    }
    query = query.bind(id);

    Ok(query.fetch_optional(pool).await?)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
