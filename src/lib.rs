#![doc = "The `planboard` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic, domain models, authentication"]
#![doc = "mechanisms, access control, data access, routing configuration, and error"]
#![doc = "handling for the planboard backend. It is used by the main binary"]
#![doc = "(`main.rs`) to construct and run the application."]

pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod routes;
