mod database;
mod hashing;
mod redis;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::hashing::Hashing;
pub use self::redis::{RedisClient, RedisConfig};
