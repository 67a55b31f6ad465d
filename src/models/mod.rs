pub mod collaborator;
pub mod project;
pub mod task;
pub mod user;

pub use collaborator::{CollaboratorInput, CollaboratorRole, CollaboratorUpdate, ProjectCollaborator};
pub use project::{Project, ProjectInput, ProjectUpdate};
pub use task::{Task, TaskInput, TaskPriority, TaskQuery, TaskStatus, TaskUpdate};
pub use user::{User, UserChanges, UserResponse, UserUpdate};
