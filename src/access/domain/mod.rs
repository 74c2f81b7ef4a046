//! Domain model for roles, capabilities and principals.

mod capability;
mod principal;
mod role;

pub use capability::Capability;
pub use principal::Principal;
pub use role::{ParseRoleError, Role};
