use crate::{
    access::can_access_project,
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Project, ProjectInput, ProjectUpdate},
    repo,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Retrieves the projects visible to the authenticated user: owned plus
/// collaborated on.
#[get("")]
pub async fn list_projects(
    pool: web::Data<PgPool>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let projects = repo::projects::list_for_user(pool.get_ref(), identity.0).await?;

    Ok(HttpResponse::Ok().json(projects))
}

/// Creates a new project owned by the authenticated user.
#[post("")]
pub async fn create_project(
    pool: web::Data<PgPool>,
    project_data: web::Json<ProjectInput>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    // Validate input
    project_data.validate()?;

    let project =
        repo::projects::insert(pool.get_ref(), identity.0, &project_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(project))
}

/// Fetches a project and checks the identity against its owner and
/// collaborator set.
///
/// An existing project the identity may not touch answers 403 rather
/// than 404.
async fn load_project_for(
    pool: &PgPool,
    project_id: i32,
    user_id: i32,
) -> Result<Project, AppError> {
    let project = repo::projects::find(pool, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    let collaborators = repo::collaborators::list_for_project(pool, project_id).await?;
    if !can_access_project(user_id, &project, &collaborators) {
        return Err(AppError::Forbidden("Access denied".into()));
    }

    Ok(project)
}

#[get("/{id}")]
pub async fn get_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<i32>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let project = load_project_for(pool.get_ref(), project_id.into_inner(), identity.0).await?;

    Ok(HttpResponse::Ok().json(project))
}

/// Applies a partial update to a project the identity can access.
///
/// Only title and description are mutable; unknown keys in the body are
/// ignored. `updated_at` is always advanced.
#[patch("/{id}")]
pub async fn update_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<i32>,
    patch_data: web::Json<ProjectUpdate>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    patch_data.validate()?;
    let project_id = project_id.into_inner();

    load_project_for(pool.get_ref(), project_id, identity.0).await?;

    let project = repo::projects::update(pool.get_ref(), project_id, &patch_data.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    Ok(HttpResponse::Ok().json(project))
}

/// Deletes a project the identity can access, along with its tasks and
/// collaborator records.
#[delete("/{id}")]
pub async fn delete_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<i32>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let project_id = project_id.into_inner();

    load_project_for(pool.get_ref(), project_id, identity.0).await?;
    repo::projects::delete(pool.get_ref(), project_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
