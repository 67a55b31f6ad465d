use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role a collaborator holds on a project.
/// Corresponds to the `collaborator_role` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "collaborator_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorRole {
    Owner,
    #[default]
    Member,
    Viewer,
}

/// A collaboration record linking a user to a project with a role.
///
/// A given (user, project) pair appears at most once; the store enforces
/// this with a unique constraint.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ProjectCollaborator {
    pub id: i32,
    pub user_id: i32,
    pub project_id: i32,
    pub role: CollaboratorRole,
    pub created_at: DateTime<Utc>,
}

/// Input structure for adding a collaborator. `role` defaults to `member`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CollaboratorInput {
    pub user_id: i32,
    pub project_id: i32,
    #[serde(default)]
    pub role: CollaboratorRole,
}

/// Partial update payload for a collaboration; only the role is mutable.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CollaboratorUpdate {
    pub role: Option<CollaboratorRole>,
}
