//! User-visible notifications raised by task mutations.
//!
//! Notifications are side effects: the dispatcher records them on a
//! best-effort, at-most-once basis and never fails the mutation that
//! triggered them. Once recorded, only the `read` flag ever changes.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Dispatch and inbox services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
