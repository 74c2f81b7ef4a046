//! User directory for the task tracker.
//!
//! Resolves user identifiers to display names for response enrichment and
//! provides the pass-through user CRUD operations. Deleting a user releases
//! the tasks assigned to them back to the backlog before the user row is
//! removed.
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
