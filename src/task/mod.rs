//! Task lifecycle management for the board.
//!
//! Tasks are created by administrators, patched by administrators (any
//! field) or members (state only), deleted by administrators, and commented
//! on by anyone who can read them. Mutations that matter to the assignee
//! raise notifications through the notification dispatcher. The module
//! follows hexagonal architecture:
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
