pub mod auth;
pub mod collaborators;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::signup)
            .service(auth::login)
            .service(auth::me),
    )
    .service(
        web::scope("/users")
            .service(users::list_users)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/projects")
            .service(projects::list_projects)
            .service(projects::create_project)
            .service(projects::get_project)
            .service(projects::update_project)
            .service(projects::delete_project),
    )
    .service(
        web::scope("/project-collaborators")
            .service(collaborators::list_collaborators)
            .service(collaborators::create_collaborator)
            .service(collaborators::get_collaborator)
            .service(collaborators::update_collaborator)
            .service(collaborators::delete_collaborator),
    );
}
