//! Módulo de base de datos
//!
//! Conexiones a PostgreSQL y Redis para los backends del store

pub mod connection;
pub mod redis_client;

pub use connection::{create_pool, run_migrations};
pub use redis_client::RedisClient;
