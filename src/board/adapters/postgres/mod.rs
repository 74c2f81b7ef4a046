//! `PostgreSQL` adapters for board configuration.

mod models;
mod repository;
mod schema;

pub use repository::PostgresBoardRepository;
