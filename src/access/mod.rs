//! Role-based access control for board and task operations.
//!
//! Every core operation receives an explicit [`domain::Principal`] resolved
//! upstream by token verification. The guard in [`guard`] maps the
//! principal's role and the shape of the requested mutation to a decision.
//!
//! - Domain types in [`domain`]
//! - Authorization checks in [`guard`]

pub mod domain;
pub mod guard;

pub use domain::{Capability, ParseRoleError, Principal, Role};
pub use guard::{AuthorizationError, authorize, authorize_patch};

#[cfg(test)]
mod tests;
