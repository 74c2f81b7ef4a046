//! Taskflow: core of a kanban-style task tracker.
//!
//! This crate holds the domain rules behind a shared task board: role-based
//! permission checks, the task lifecycle with its assignee notifications,
//! the derived board projection, and the user and notification directories
//! those operations lean on. HTTP routing and token verification live
//! upstream; every operation here takes an already authenticated
//! [`access::Principal`].
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration that applies the guard, the domain rules
//!   and the best-effort side effects
//!
//! # Modules
//!
//! - [`access`]: Roles, capabilities and the permission guard
//! - [`task`]: Task lifecycle and comments
//! - [`board`]: Board projection and column management
//! - [`notification`]: Best-effort dispatch and the per-user inbox
//! - [`user`]: User directory and username resolution
//! - [`error`]: Error taxonomy and status classes
//! - [`config`]: Layered runtime configuration
//! - [`telemetry`]: `tracing` subscriber setup
//! - [`postgres`]: Connection pool and blocking helpers

pub mod access;
pub mod board;
pub mod config;
pub mod error;
pub mod notification;
pub mod postgres;
pub mod task;
pub mod telemetry;
pub mod user;

#[cfg(test)]
mod test_support;
