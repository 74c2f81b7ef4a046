//! Application services for the user directory.

mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
