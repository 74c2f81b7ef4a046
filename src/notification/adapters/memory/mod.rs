//! In-memory notification repository.

mod notification;

pub use notification::InMemoryNotificationRepository;
