// Service exports
pub mod cache;
pub mod directory;
pub mod postgres;

pub use cache::CachedDirectory;
pub use directory::{DirectoryError, InMemoryDirectory, LocationDirectory};
pub use postgres::{PoolSettings, PostgresClient, PostgresError};
