use crate::{
    access::can_access_task,
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Task, TaskInput, TaskQuery, TaskUpdate},
    repo,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Retrieves the tasks assigned to the authenticated user.
///
/// Supports filtering by `status`, `priority`, and `project_id` query
/// parameters. Tasks are ordered by creation date in descending order.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query_params: web::Query<TaskQuery>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks =
        repo::tasks::list_for_user(pool.get_ref(), identity.0, &query_params.into_inner()).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task assigned to the authenticated user.
///
/// `status` defaults to `pending` and `priority` to `medium` when absent.
/// A `project_id` pointing at a nonexistent project is rejected with 400.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = repo::tasks::insert(pool.get_ref(), identity.0, &task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Fetches a task and checks the identity against its assignee.
///
/// An existing task the identity may not touch answers 403 rather than 404.
async fn load_task_for(pool: &PgPool, task_id: i32, user_id: i32) -> Result<Task, AppError> {
    let task = repo::tasks::find(pool, task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    if !can_access_task(user_id, &task) {
        return Err(AppError::Forbidden("Access denied".into()));
    }

    Ok(task)
}

#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task = load_task_for(pool.get_ref(), task_id.into_inner(), identity.0).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Applies a partial update to a task the identity is assigned to.
///
/// Only the fields named in [`TaskUpdate`] are mutable; unknown keys in the
/// body are ignored. `updated_at` is always advanced.
#[patch("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    patch_data: web::Json<TaskUpdate>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    patch_data.validate()?;
    let task_id = task_id.into_inner();

    load_task_for(pool.get_ref(), task_id, identity.0).await?;

    let task = repo::tasks::update(pool.get_ref(), task_id, &patch_data.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}

#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    load_task_for(pool.get_ref(), task_id, identity.0).await?;
    repo::tasks::delete(pool.get_ref(), task_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
