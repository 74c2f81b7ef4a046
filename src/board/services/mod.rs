//! Application services for the board projection and column management.

mod aggregator;

pub use aggregator::{BoardService, BoardServiceError, BoardServiceResult};
