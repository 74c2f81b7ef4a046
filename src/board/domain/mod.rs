//! Domain model for board columns and the board projection.

mod board;
mod column;
mod error;

pub use board::{Board, BoardColumn};
pub use column::{Column, ColumnId, ColumnUpdate, decode_column_order, encode_column_order};
pub use error::BoardDomainError;
