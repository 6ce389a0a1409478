//! In-process adapters used when no database is configured.

mod user_repository;

pub use user_repository::InMemoryUserRepository;
