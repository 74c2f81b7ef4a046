//! Domain model for users.

mod error;
mod ids;
mod names;
mod user;

pub use error::UserDomainError;
pub use ids::UserId;
pub use names::UsernameIndex;
pub use user::{Email, PersistedUserData, User, Username};
