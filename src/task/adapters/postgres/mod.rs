//! `PostgreSQL` adapters for task and comment persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresTaskRepository;
