//! Access-control predicates.
//!
//! These are pure functions over already-fetched rows, so route handlers can
//! decide authorization without the store and tests can exercise every case
//! in memory. An existing entity the identity may not touch answers 403, not
//! 404.

use crate::models::{Project, ProjectCollaborator, Task};

/// A user may access a project iff they own it or appear in its collaborator
/// set, with any role.
pub fn can_access_project(
    user_id: i32,
    project: &Project,
    collaborators: &[ProjectCollaborator],
) -> bool {
    project.owner_id == user_id || collaborators.iter().any(|c| c.user_id == user_id)
}

/// A user may access a task iff they are its assignee.
pub fn can_access_task(user_id: i32, task: &Task) -> bool {
    task.user_id == user_id
}
