//! Adapter implementations for the board port.

pub mod memory;
pub mod postgres;
