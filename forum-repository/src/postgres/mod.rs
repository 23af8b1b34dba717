//! PostgreSQL implementations of the forum repository traits.
mod content_repository;
mod vote_repository;

pub use content_repository::PostgresContentRepository;
pub use vote_repository::PostgresVoteRepository;
