//! In-memory board repository.

mod board;

pub use board::InMemoryBoardRepository;
