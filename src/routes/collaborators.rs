use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{CollaboratorInput, CollaboratorUpdate},
    repo,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Lists the collaboration records of every project visible to the
/// authenticated user.
#[get("")]
pub async fn list_collaborators(
    pool: web::Data<PgPool>,
    identity: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let collaborators = repo::collaborators::list_for_user(pool.get_ref(), identity.0).await?;

    Ok(HttpResponse::Ok().json(collaborators))
}

/// Adds a collaborator to a project. `role` defaults to `member`.
///
/// A user collaborates on a given project at most once; a duplicate pair or
/// a dangling user/project reference is rejected with 400.
#[post("")]
pub async fn create_collaborator(
    pool: web::Data<PgPool>,
    collaborator_data: web::Json<CollaboratorInput>,
) -> Result<impl Responder, AppError> {
    // Friendlier message than the raw constraint violation; the unique
    // constraint still decides a concurrent duplicate.
    if repo::collaborators::find_pair(
        pool.get_ref(),
        collaborator_data.user_id,
        collaborator_data.project_id,
    )
    .await?
    .is_some()
    {
        return Err(AppError::BadRequest(
            "User is already a collaborator on this project".into(),
        ));
    }

    let collaborator =
        repo::collaborators::insert(pool.get_ref(), &collaborator_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(collaborator))
}

#[get("/{id}")]
pub async fn get_collaborator(
    pool: web::Data<PgPool>,
    collaborator_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let collaborator = repo::collaborators::find(pool.get_ref(), collaborator_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Collaborator not found".into()))?;

    Ok(HttpResponse::Ok().json(collaborator))
}

/// Changes the role of a collaboration; the linked user and project are
/// fixed at creation.
#[patch("/{id}")]
pub async fn update_collaborator(
    pool: web::Data<PgPool>,
    collaborator_id: web::Path<i32>,
    patch_data: web::Json<CollaboratorUpdate>,
) -> Result<impl Responder, AppError> {
    let collaborator_id = collaborator_id.into_inner();

    let collaborator = match patch_data.role {
        Some(role) => repo::collaborators::update_role(pool.get_ref(), collaborator_id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("Collaborator not found".into()))?,
        // An empty patch is a no-op read.
        None => repo::collaborators::find(pool.get_ref(), collaborator_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Collaborator not found".into()))?,
    };

    Ok(HttpResponse::Ok().json(collaborator))
}

#[delete("/{id}")]
pub async fn delete_collaborator(
    pool: web::Data<PgPool>,
    collaborator_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let deleted = repo::collaborators::delete(pool.get_ref(), collaborator_id.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Collaborator not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
