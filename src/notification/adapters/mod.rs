//! Adapter implementations for the notification port.

pub mod memory;
pub mod postgres;
