//! Kanban board projection and column configuration.
//!
//! The board is never stored. It is assembled on every read from the
//! persisted columns, the persisted column order and the current tasks.
//! Every task appears in the board's task map; it also sits in a column
//! bucket only when its state names an existing column.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
