//! Data access layer: per-entity CRUD over the Postgres pool.
//!
//! All queries are runtime-checked `sqlx` queries with bound parameters.
//! Uniqueness and referential integrity live in the store (see
//! `migrations/0001_init.sql`); violations surface as `sqlx::Error` and are
//! translated to client errors at the boundary. Deletes rely on the store's
//! `ON DELETE CASCADE` rules to remove dependent rows.

pub mod collaborators;
pub mod projects;
pub mod tasks;
pub mod users;
