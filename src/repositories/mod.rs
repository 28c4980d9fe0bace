pub mod memory_record_repository;
pub mod pg_record_repository;
pub mod record_store;
pub mod redis_record_repository;

pub use memory_record_repository::MemoryRecordRepository;
pub use pg_record_repository::PgRecordRepository;
pub use record_store::{RecordStore, StoreError};
pub use redis_record_repository::RedisRecordRepository;
